//! Shared test arguments: the devnet client and the contract fixture graph

use std::str::FromStr;

use alloy::{
    eips::BlockId,
    network::EthereumWallet,
    primitives::{utils::parse_ether, Address, U256},
    providers::{ext::AnvilApi, DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    sol_types::SolValue,
    transports::http::reqwest::Url,
};
use eyre::{ensure, eyre, Result};
use scripts::{
    constants::{
        ESCROW_NAME, ESCROW_SYMBOL, ESCROW_VERSION, TOKEN_DECIMALS, TOKEN_INITIAL_SUPPLY,
        TOKEN_NAME, TOKEN_SYMBOL,
    },
    types::DaoContract,
    utils::Wallet,
};

use crate::{
    abis::{
        Controller, CrvToken, CurvePool, Escrow, Gauge, GaugeController, LiquidityGauge, LpToken,
        Minter, Pool, PoolProxy, Proxy, TestCoin, TokenMinter, VotingEscrow, ERC20, ERC20CRV,
        ERC20LP,
    },
    constants::{
        COIN_A_NAME, COIN_A_SYMBOL, COIN_B_NAME, COIN_B_SYMBOL, EXTRA_ACCOUNT_ETH,
        LP_TOKEN_INITIAL_SUPPLY, LP_TOKEN_NAME, LP_TOKEN_SYMBOL, MOCK_COIN_DECIMALS,
        N_EXTRA_ACCOUNTS, N_GAUGES, POOL_AMPLIFICATION, POOL_FEE,
    },
    utils::{deploy_fixture, send_tx, theoretical_supply},
};

/// Arguments passed to each integration test: the shared devnet client and
/// the contract fixture graph, deployed once per run
#[derive(Clone)]
pub struct TestArgs {
    /// The devnet client, signing for the deployer and the extra accounts
    pub client: Wallet,
    /// Addresses with registered signers; the deployer is first
    pub accounts: Vec<Address>,

    /// The CRV token
    pub token: CrvToken,
    /// The voting escrow
    pub voting_escrow: Escrow,
    /// The gauge controller
    pub gauge_controller: Controller,
    /// The CRV minter
    pub minter: TokenMinter,
    /// The pool ownership proxy
    pub pool_proxy: Proxy,
    /// A liquidity gauge over the mock LP token
    pub liquidity_gauge: Gauge,
    /// Three further gauges over the mock LP token
    pub three_gauges: Vec<Gauge>,

    /// The first mock pool coin
    pub coin_a: TestCoin,
    /// The second mock pool coin
    pub coin_b: TestCoin,
    /// The mock LP token
    pub mock_lp_token: LpToken,
    /// The mock pool
    pub pool: Pool,
}

impl TestArgs {
    /// Build the devnet client and deploy the fixture graph in constructor
    /// dependency order
    pub async fn setup(pkey: &str, rpc_url: &str, artifacts_dir: &str) -> Result<Self> {
        let (client, accounts) = setup_client(pkey, rpc_url).await?;

        // Core contracts
        let constructor_args = (
            TOKEN_NAME,
            TOKEN_SYMBOL,
            U256::from(TOKEN_DECIMALS),
            U256::from(TOKEN_INITIAL_SUPPLY),
        )
            .abi_encode_params();
        let token_addr =
            deploy_fixture(&client, DaoContract::Erc20Crv, artifacts_dir, constructor_args)
                .await?;
        let token = ERC20CRV::new(token_addr, client.clone());

        let constructor_args =
            (token_addr, ESCROW_NAME, ESCROW_SYMBOL, ESCROW_VERSION).abi_encode_params();
        let escrow_addr =
            deploy_fixture(&client, DaoContract::VotingEscrow, artifacts_dir, constructor_args)
                .await?;
        let voting_escrow = VotingEscrow::new(escrow_addr, client.clone());

        let constructor_args = (token_addr, escrow_addr).abi_encode_params();
        let controller_addr = deploy_fixture(
            &client,
            DaoContract::GaugeController,
            artifacts_dir,
            constructor_args,
        )
        .await?;
        let gauge_controller = GaugeController::new(controller_addr, client.clone());

        let constructor_args = (token_addr, controller_addr).abi_encode_params();
        let minter_addr =
            deploy_fixture(&client, DaoContract::Minter, artifacts_dir, constructor_args).await?;
        let minter = Minter::new(minter_addr, client.clone());

        let proxy_addr =
            deploy_fixture(&client, DaoContract::PoolProxy, artifacts_dir, Vec::new()).await?;
        let pool_proxy = PoolProxy::new(proxy_addr, client.clone());

        // Testing contracts
        let constructor_args =
            (COIN_A_NAME, COIN_A_SYMBOL, U256::from(MOCK_COIN_DECIMALS)).abi_encode_params();
        let coin_a_addr =
            deploy_fixture(&client, DaoContract::Erc20, artifacts_dir, constructor_args).await?;
        let coin_a = ERC20::new(coin_a_addr, client.clone());

        let constructor_args =
            (COIN_B_NAME, COIN_B_SYMBOL, U256::from(MOCK_COIN_DECIMALS)).abi_encode_params();
        let coin_b_addr =
            deploy_fixture(&client, DaoContract::Erc20, artifacts_dir, constructor_args).await?;
        let coin_b = ERC20::new(coin_b_addr, client.clone());

        let constructor_args = (
            LP_TOKEN_NAME,
            LP_TOKEN_SYMBOL,
            U256::from(MOCK_COIN_DECIMALS),
            U256::from(LP_TOKEN_INITIAL_SUPPLY),
        )
            .abi_encode_params();
        let lp_addr =
            deploy_fixture(&client, DaoContract::Erc20Lp, artifacts_dir, constructor_args).await?;
        let mock_lp_token = ERC20LP::new(lp_addr, client.clone());

        // Gauges reference the LP token & minter
        let gauge_args = (lp_addr, minter_addr).abi_encode_params();
        let gauge_addr = deploy_fixture(
            &client,
            DaoContract::LiquidityGauge,
            artifacts_dir,
            gauge_args.clone(),
        )
        .await?;
        let liquidity_gauge = LiquidityGauge::new(gauge_addr, client.clone());

        let mut three_gauges = Vec::with_capacity(N_GAUGES);
        for _ in 0..N_GAUGES {
            let addr = deploy_fixture(
                &client,
                DaoContract::LiquidityGauge,
                artifacts_dir,
                gauge_args.clone(),
            )
            .await?;
            three_gauges.push(LiquidityGauge::new(addr, client.clone()));
        }

        let constructor_args = (
            [coin_a_addr, coin_b_addr],
            lp_addr,
            U256::from(POOL_AMPLIFICATION),
            U256::from(POOL_FEE),
        )
            .abi_encode_params();
        let pool_addr =
            deploy_fixture(&client, DaoContract::CurvePool, artifacts_dir, constructor_args)
                .await?;
        let pool = CurvePool::new(pool_addr, client.clone());

        // The pool mints & burns the LP token
        send_tx(mock_lp_token.set_minter(pool_addr)).await?;

        Ok(Self {
            client,
            accounts,
            token,
            voting_escrow,
            gauge_controller,
            minter,
            pool_proxy,
            liquidity_gauge,
            three_gauges,
            coin_a,
            coin_b,
            mock_lp_token,
            pool,
        })
    }

    /// The deployer address, owner of the whole fixture graph
    pub fn deployer(&self) -> Address {
        self.accounts[0]
    }

    /// The latest block's timestamp
    pub async fn block_timestamp(&self) -> Result<u64> {
        let block = self
            .client
            .get_block(BlockId::latest())
            .await?
            .ok_or_else(|| eyre!("no latest block on devnet"))?;

        Ok(block.header.timestamp)
    }

    /// The closed-form expected CRV supply at the latest block, derived from
    /// the token's on-chain epoch state
    pub async fn theoretical_supply(&self) -> Result<u128> {
        let epoch = self.token.mining_epoch().call().await?;
        let start_epoch_time = self.token.start_epoch_time().call().await?;
        let timestamp = self.block_timestamp().await?;

        let elapsed = timestamp.saturating_sub(start_epoch_time.to::<u64>());
        Ok(theoretical_supply(epoch, elapsed))
    }

    /// Advance the devnet clock by the given number of seconds and mine a
    /// block at the new time
    pub async fn advance_time(&self, secs: u64) -> Result<()> {
        self.client.anvil_increase_time(secs).await?;
        self.client.anvil_mine(Some(1), None).await?;
        Ok(())
    }

    /// Snapshot the devnet state, returning the snapshot id
    pub async fn snapshot(&self) -> Result<U256> {
        Ok(self.client.anvil_snapshot().await?)
    }

    /// Revert the devnet to the given snapshot
    pub async fn revert_to(&self, snapshot_id: U256) -> Result<()> {
        let reverted = self.client.anvil_revert(snapshot_id).await?;
        ensure!(reverted, "revert to snapshot {snapshot_id} failed");
        Ok(())
    }
}

/// Build the devnet client, generating, funding, and registering the extra
/// accounts alongside the deployer
async fn setup_client(pkey: &str, rpc_url: &str) -> Result<(Wallet, Vec<Address>)> {
    let deployer = PrivateKeySigner::from_str(pkey)?;
    let mut accounts = vec![deployer.address()];
    let mut wallet = EthereumWallet::new(deployer);

    for _ in 0..N_EXTRA_ACCOUNTS {
        let signer = PrivateKeySigner::random();
        accounts.push(signer.address());
        wallet.register_signer(signer);
    }

    let url = Url::parse(rpc_url)?;
    let provider = ProviderBuilder::new()
        .wallet(wallet)
        .with_simple_nonce_management()
        .connect_http(url);
    let client = DynProvider::new(provider);

    let balance = parse_ether(EXTRA_ACCOUNT_ETH)?;
    for account in accounts.iter().skip(1 /* deployer */) {
        client.anvil_set_balance(*account, balance).await?;
    }

    Ok((client, accounts))
}
