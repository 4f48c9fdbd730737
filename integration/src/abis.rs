//! Typed bindings for the deployed DAO contract set.
//!
//! The interfaces mirror the compiled Vyper ABIs, hence the snake_case
//! method names and `uint256` decimals.

use alloy::{network::Ethereum, sol};
use scripts::utils::Wallet;

sol! {
    /// The CRV governance & utility token, minting on a piecewise-linear
    /// epoch schedule
    #[sol(rpc)]
    interface ERC20CRV {
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function decimals() external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function balanceOf(address _owner) external view returns (uint256);
        function transfer(address _to, uint256 _value) external returns (bool);

        function mining_epoch() external view returns (int128);
        function start_epoch_time() external view returns (uint256);
        function rate() external view returns (uint256);
        function available_supply() external view returns (uint256);
        function update_mining_parameters() external;
    }

    /// The vote-escrowed CRV contract, locking CRV for voting weight
    #[sol(rpc)]
    interface VotingEscrow {
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function version() external view returns (string memory);
        function decimals() external view returns (uint256);

        function token() external view returns (address);
        function controller() external view returns (address);
        function changeController(address _newController) external;
    }

    /// Vote-weighted registry of liquidity gauges
    #[sol(rpc)]
    interface GaugeController {
        function token() external view returns (address);
        function voting_escrow() external view returns (address);
        function n_gauge_types() external view returns (int128);
        function n_gauges() external view returns (int128);
        function gauges(uint256 arg0) external view returns (address);

        // Reverts for gauges that were never added
        function gauge_types(address _addr) external view returns (int128);

        function add_type(string memory _name, uint256 weight) external;
        function add_gauge(address addr, int128 gauge_type, uint256 weight) external;
        function get_gauge_weight(address addr) external view returns (uint256);
        function get_total_weight() external view returns (uint256);
    }

    /// Mints CRV to liquidity providers according to gauge weights
    #[sol(rpc)]
    interface Minter {
        function token() external view returns (address);
        function controller() external view returns (address);
        function minted(address arg0, address arg1) external view returns (uint256);
        function mint(address gauge_addr) external;
    }

    /// Measures LP token deposits over time
    #[sol(rpc)]
    interface LiquidityGauge {
        function lp_token() external view returns (address);
        function minter() external view returns (address);
        function balanceOf(address arg0) external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function deposit(uint256 _value) external;
        function withdraw(uint256 _value) external;
    }

    /// Admin proxy for pools, owned by its deployer
    #[sol(rpc)]
    interface PoolProxy {
        function admin() external view returns (address);
    }

    /// Plain ERC20, standing in for a pool coin
    #[sol(rpc)]
    interface ERC20 {
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function decimals() external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function balanceOf(address _owner) external view returns (uint256);
        function transfer(address _to, uint256 _value) external returns (bool);
        function approve(address _spender, uint256 _value) external returns (bool);
    }

    /// Mintable ERC20, standing in for a pool's LP token
    #[sol(rpc)]
    interface ERC20LP {
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function decimals() external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function balanceOf(address _owner) external view returns (uint256);
        function transfer(address _to, uint256 _value) external returns (bool);
        function approve(address _spender, uint256 _value) external returns (bool);

        function minter() external view returns (address);
        function set_minter(address _minter) external;
        function mint(address _to, uint256 _value) external;
    }

    /// Mock exchange pool wiring two coins to an LP token
    #[sol(rpc)]
    interface CurvePool {
        function coins(uint256 arg0) external view returns (address);
    }
}

/// A typed instance of the deployed CRV token
pub type CrvToken = ERC20CRV::ERC20CRVInstance<Wallet, Ethereum>;

/// A typed instance of the deployed voting escrow
pub type Escrow = VotingEscrow::VotingEscrowInstance<Wallet, Ethereum>;

/// A typed instance of the deployed gauge controller
pub type Controller = GaugeController::GaugeControllerInstance<Wallet, Ethereum>;

/// A typed instance of the deployed CRV minter
pub type TokenMinter = Minter::MinterInstance<Wallet, Ethereum>;

/// A typed instance of a deployed liquidity gauge
pub type Gauge = LiquidityGauge::LiquidityGaugeInstance<Wallet, Ethereum>;

/// A typed instance of the deployed pool proxy
pub type Proxy = PoolProxy::PoolProxyInstance<Wallet, Ethereum>;

/// A typed instance of a deployed mock coin
pub type TestCoin = ERC20::ERC20Instance<Wallet, Ethereum>;

/// A typed instance of the deployed mock LP token
pub type LpToken = ERC20LP::ERC20LPInstance<Wallet, Ethereum>;

/// A typed instance of the deployed mock pool
pub type Pool = CurvePool::CurvePoolInstance<Wallet, Ethereum>;
