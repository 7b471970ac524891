//! PRT sale contract bindings

use alloy::sol;

sol! {
    /// PRT token sale and NFT mint interface
    #[sol(rpc)]
    interface IPRT {
        /// Total PRT sold so far
        function getTotalPRT() external view returns (uint256);

        /// Total NFTs minted so far (also the next token id counter)
        function getTotalMinted() external view returns (uint256);

        /// Maximum PRT that can ever be sold
        function MAX_SUPPLY_PRT() external view returns (uint256);

        /// Maximum NFTs that can ever be minted
        function MAX_SUPPLY_FOR_TOKEN() external view returns (uint256);

        /// Whether the PRT presale is running
        function presalePRT() external view returns (bool);

        /// Whether public minting is open
        function mintIsOpen() external view returns (bool);

        /// PRT price in wei
        function PRICE_PRT() external view returns (uint256);

        /// PRT bought by an account
        function perAccountPRT(address account) external view returns (uint256);

        /// Whether an account won the PRT draw
        function isWinner(address account) external view returns (bool);

        /// Buy PRT for `account`
        function buyPRT(address account, uint8 amount) external payable;

        /// Mint one NFT for the sender
        function publicSaleMint() external payable;

        /// PRT token ids handed out by a purchase
        event DitributePRTs(uint256[] list);

        /// NFT minted by `account` at `price`
        event Minter(address indexed account, uint256 tokenID, uint256 price);

        /// ERC-721 transfer, emitted alongside mints
        event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);
    }
}
