#![allow(dead_code)]

use anchor_lang::AccountDeserialize;
use solana_program_test::{processor, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::{
    clock::Clock, instruction::Instruction, pubkey::Pubkey, signature::Keypair, signer::Signer,
    system_instruction, transaction::Transaction,
};

pub const LAMPORTS_PER_OWNER: u64 = 10_000_000_000;

#[macro_export]
macro_rules! assert_program_error {
    ( $error:expr, $code:expr ) => {
        match $error {
            solana_program_test::BanksClientError::TransactionError(
                solana_sdk::transaction::TransactionError::InstructionError(
                    _,
                    solana_sdk::instruction::InstructionError::Custom(x),
                ),
            ) => assert_eq!(x, u32::from($code), "unexpected custom error {x}"),
            err => panic!("Expected custom instruction error but got '{:#?}'", err),
        }
    };
}

#[macro_export]
macro_rules! get_account {
    ( $context:expr, $pubkey:expr ) => {{
        $context
            .banks_client
            .get_account($pubkey)
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("account not found: {}", $pubkey))
    }};
}

pub mod pool;
pub mod token;

pub fn program_test() -> ProgramTest {
    ProgramTest::new(
        "nft_staking_pool",
        nft_staking_pool::ID,
        processor!(nft_staking_pool::entry),
    )
}

pub async fn start() -> ProgramTestContext {
    program_test().start_with_context().await
}

/// Send `instructions` paid by the first signer, on a fresh blockhash so that
/// repeated identical transactions are not deduplicated.
pub async fn send(
    context: &mut ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> Result<(), BanksClientError> {
    let blockhash = context.get_new_latest_blockhash().await.unwrap();
    let tx = Transaction::new_signed_with_payer(
        instructions,
        Some(&signers[0].pubkey()),
        signers,
        blockhash,
    );
    context.banks_client.process_transaction(tx).await
}

/// New keypair funded by the context payer.
pub async fn funded_keypair(context: &mut ProgramTestContext) -> Keypair {
    let keypair = Keypair::new();
    let transfer = system_instruction::transfer(
        &context.payer.pubkey(),
        &keypair.pubkey(),
        LAMPORTS_PER_OWNER,
    );
    let payer = Keypair::from_bytes(&context.payer.to_bytes()).unwrap();
    send(context, &[transfer], &[&payer]).await.unwrap();
    keypair
}

pub async fn set_clock(context: &mut ProgramTestContext, unix_timestamp: i64) {
    let mut clock = context.banks_client.get_sysvar::<Clock>().await.unwrap();
    clock.unix_timestamp = unix_timestamp;
    context.set_sysvar::<Clock>(&clock);
}

pub async fn fetch<T: AccountDeserialize>(context: &mut ProgramTestContext, address: &Pubkey) -> T {
    let account = get_account!(context, *address);
    T::try_deserialize(&mut account.data.as_slice()).unwrap()
}
