mod command;
use command::*;

use clap::{IntoApp, Parser};
use claim::{process_claim, process_claimable};
use list::process_list;
use nft_staking_pool_client::StakingClient;
use pool::{process_init_pool, process_pool_info, InitPoolArgs};
use solana_clap_v3_utils::{
    input_validators::normalize_to_url_if_moniker, keypair::signer_from_path,
};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_remote_wallet::remote_wallet::RemoteWalletManager;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey, signer::Signer};
use stake::{process_stake, process_unstake};
use std::{process::exit, rc::Rc, sync::Arc, time::Duration};

struct Config {
    commitment_config: CommitmentConfig,
    default_signer: Box<dyn Signer>,
    json_rpc_url: String,
    verbose: bool,
    websocket_url: String,
    confirmation_deadline: Duration,
}

fn exit_with_error(err: Box<dyn std::error::Error>) -> ! {
    eprintln!("error: {err}");
    exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Arguments::parse();
    let mut wallet_manager: Option<Rc<RemoteWalletManager>> = None;

    let config = {
        let cli_config =
            solana_cli_config::Config::load(if let Some(config_file) = &args.config_file {
                config_file
            } else if let Some(ref config_file) = *solana_cli_config::CONFIG_FILE {
                config_file
            } else {
                eprintln!("missing configuration file");
                exit(1);
            })
            .unwrap_or_default();

        let matches = Arguments::command().get_matches();
        let default_signer = signer_from_path(
            &matches,
            args.keypair.as_ref().unwrap_or(&cli_config.keypair_path),
            "keypair",
            &mut wallet_manager,
        )?;

        let json_rpc_url = normalize_to_url_if_moniker(
            args.json_rpc_url
                .clone()
                .unwrap_or(cli_config.json_rpc_url),
        );
        let websocket_url = solana_cli_config::Config::compute_websocket_url(&json_rpc_url);

        Config {
            commitment_config: CommitmentConfig::confirmed(),
            default_signer,
            json_rpc_url,
            verbose: args.verbose,
            websocket_url,
            confirmation_deadline: Duration::from_secs(args.timeout),
        }
    };
    solana_logger::setup_with_default("solana=info");

    if config.verbose {
        println!("JSON RPC URL: {}", config.json_rpc_url);
        println!("Websocket URL: {}", config.websocket_url);
    }
    let rpc_client = Arc::new(RpcClient::new_with_commitment(
        config.json_rpc_url.clone(),
        config.commitment_config,
    ));
    let signer = config.default_signer.as_ref();

    let client = |pool: Option<Pubkey>| -> StakingClient {
        let pool = pool.unwrap_or_else(|| {
            eprintln!("error: --pool is required for this command");
            exit(1);
        });
        StakingClient::new(rpc_client.clone(), pool).with_deadline(config.confirmation_deadline)
    };

    match args.command {
        Commands::InitPool {
            reward_mint,
            reward_amount,
            collection,
            period,
            withdrawable,
        } => {
            let (pool, signature) = process_init_pool(
                rpc_client.clone(),
                signer,
                config.confirmation_deadline,
                InitPoolArgs {
                    reward_mint,
                    reward_amount,
                    period,
                    withdrawable,
                    collection,
                },
            )
            .await
            .unwrap_or_else(|err| exit_with_error(err));
            println!("Pool: {pool}");
            println!("Signature: {signature}");
        }
        Commands::PoolInfo => {
            process_pool_info(&client(args.pool))
                .await
                .unwrap_or_else(|err| exit_with_error(err));
        }
        Commands::List { owner } => {
            process_list(
                &client(args.pool),
                owner.unwrap_or_else(|| signer.pubkey()),
                config.verbose,
            )
            .await
            .unwrap_or_else(|err| exit_with_error(err));
        }
        Commands::Stake {
            mint,
            token_account,
        } => {
            let signature = process_stake(&client(args.pool), signer, mint, token_account)
                .await
                .unwrap_or_else(|err| exit_with_error(err));
            println!("Signature: {signature}");
        }
        Commands::Unstake { stake_record } => {
            let signature = process_unstake(&client(args.pool), signer, stake_record)
                .await
                .unwrap_or_else(|err| exit_with_error(err));
            println!("Signature: {signature}");
        }
        Commands::Claim { stake_record } => {
            process_claim(&client(args.pool), signer, stake_record)
                .await
                .unwrap_or_else(|err| exit_with_error(err));
        }
        Commands::Claimable { owner } => {
            process_claimable(&client(args.pool), owner.unwrap_or_else(|| signer.pubkey()))
                .await
                .unwrap_or_else(|err| exit_with_error(err));
        }
    }

    Ok(())
}
