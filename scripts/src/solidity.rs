//! Definitions of contract functions called during deployment

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface ERC20CRV {
        function balanceOf(address _owner) external view returns (uint256);
        function transfer(address _to, uint256 _value) external returns (bool);
    }

    #[sol(rpc)]
    interface VotingEscrow {
        function changeController(address _newController) external;
    }
}
