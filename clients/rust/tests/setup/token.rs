use anchor_lang::AnchorSerialize;
use anchor_spl::token::spl_token;
use nft_staking_pool::{
    metaplex::{self, TokenMetadata, MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH, MAX_URI_LENGTH},
    pda,
};
use nft_staking_pool_client::get_associated_token_address;
use solana_program_test::ProgramTestContext;
use solana_sdk::{
    account::{Account, AccountSharedData},
    program_pack::Pack,
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    system_instruction,
};

use super::send;

fn padded(value: &str, len: usize) -> String {
    let mut padded = value.to_string();
    padded.extend(std::iter::repeat('\0').take(len - value.len()));
    padded
}

/// Create a mint with `authority` as mint authority.
pub async fn create_mint(context: &mut ProgramTestContext, authority: &Keypair, decimals: u8) -> Pubkey {
    let mint = Keypair::new();
    let rent = context.banks_client.get_rent().await.unwrap();
    let instructions = [
        system_instruction::create_account(
            &authority.pubkey(),
            &mint.pubkey(),
            rent.minimum_balance(spl_token::state::Mint::LEN),
            spl_token::state::Mint::LEN as u64,
            &spl_token::ID,
        ),
        spl_token::instruction::initialize_mint2(
            &spl_token::ID,
            &mint.pubkey(),
            &authority.pubkey(),
            None,
            decimals,
        )
        .unwrap(),
    ];
    send(context, &instructions, &[authority, &mint]).await.unwrap();
    mint.pubkey()
}

/// Create the associated token account of `owner` for `mint`, paid by `payer`.
pub async fn create_associated_account(
    context: &mut ProgramTestContext,
    payer: &Keypair,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Pubkey {
    let instruction = nft_staking_pool_client::instructions::create_associated_token_account(
        &payer.pubkey(),
        owner,
        mint,
    );
    send(context, &[instruction], &[payer]).await.unwrap();
    get_associated_token_address(owner, mint)
}

pub async fn mint_to(
    context: &mut ProgramTestContext,
    authority: &Keypair,
    mint: &Pubkey,
    account: &Pubkey,
    amount: u64,
) {
    let instruction = spl_token::instruction::mint_to(
        &spl_token::ID,
        mint,
        account,
        &authority.pubkey(),
        &[],
        amount,
    )
    .unwrap();
    send(context, &[instruction], &[authority]).await.unwrap();
}

pub async fn token_balance(context: &mut ProgramTestContext, account: &Pubkey) -> u64 {
    let account = get_account!(context, *account);
    spl_token::state::Account::unpack(&account.data).unwrap().amount
}

/// Write a Metaplex metadata account for `mint` carrying `symbol`.
pub fn set_metadata(context: &mut ProgramTestContext, mint: &Pubkey, name: &str, symbol: &str) {
    let metadata = TokenMetadata {
        key: metaplex::METADATA_V1_KEY,
        update_authority: Pubkey::new_unique(),
        mint: *mint,
        name: padded(name, MAX_NAME_LENGTH),
        symbol: padded(symbol, MAX_SYMBOL_LENGTH),
        uri: padded("https://example.com/nft.json", MAX_URI_LENGTH),
    };
    let mut data = metadata.try_to_vec().unwrap();
    // trailing fields of the account are never read
    data.resize(679, 0);
    let account = Account {
        lamports: 5_616_720,
        data,
        owner: metaplex::ID,
        executable: false,
        rent_epoch: 0,
    };
    context.set_account(
        &pda::find_metadata_address(mint).0,
        &AccountSharedData::from(account),
    );
}

/// Mint a fresh NFT of `symbol` into the associated token account of `owner`.
/// Returns the mint and the owner's token account.
pub async fn mint_nft(
    context: &mut ProgramTestContext,
    owner: &Keypair,
    name: &str,
    symbol: &str,
) -> (Pubkey, Pubkey) {
    let mint = create_mint(context, owner, 0).await;
    let account = create_associated_account(context, owner, &owner.pubkey(), &mint).await;
    mint_to(context, owner, &mint, &account, 1).await;
    set_metadata(context, &mint, name, symbol);
    (mint, account)
}
