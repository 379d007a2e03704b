use alloy::primitives::{address, Address};
use alloy::sol;

/// Address of the XCM Utilities precompile.
pub const XCM_UTILS_ADDRESS: Address = address!("000000000000000000000000000000000000080C");

// Compiled from `contracts/Incrementer.sol` (solc 0.8.15, optimizer off).
sol!(
    #[sol(rpc)]
    Incrementer,
    "../../out/Incrementer.sol/Incrementer.json"
);

sol! {
    /// Metadata subset of ERC-20 exposed by XC-20 tokens.
    #[sol(rpc)]
    interface IERC20Metadata {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
    }
}

sol! {
    #[sol(rpc)]
    interface XcmUtils {
        struct Multilocation {
            uint8 parents;
            bytes[] interior;
        }

        function multilocationToAddress(Multilocation memory location)
            external
            view
            returns (address accountAddress);

        function weightMessage(bytes memory message) external view returns (uint64 weight);

        function xcmExecute(bytes memory message, uint64 maxWeight) external;

        function xcmSend(Multilocation memory dest, bytes memory message) external;
    }
}
