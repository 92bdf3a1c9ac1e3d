use clap::Parser;
use swapform::domain::form::SwapMode;

#[derive(Parser, Debug)]
#[command(name = "swapform")]
#[command(author = "quake")]
#[command(version)]
#[command(about = "A terminal token-swap form with half/max balance shortcuts")]
pub struct Args {
    /// Tick rate in ticks per second
    #[arg(short, long, default_value_t = 4.0)]
    pub tick_rate: f64,

    /// Frame rate in frames per second
    #[arg(short, long, default_value_t = 60.0)]
    pub frame_rate: f64,

    /// Network to use (mainnet, devnet)
    #[arg(short, long)]
    pub network: Option<String>,

    /// Data directory path
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Public key of a wallet to connect at startup
    #[arg(short, long)]
    pub wallet: Option<String>,

    /// Swap mode (ExactIn, ExactOut, ExactInOrOut)
    #[arg(long)]
    pub swap_mode: Option<SwapMode>,

    /// Lock both amount fields
    #[arg(long)]
    pub fixed_amount: bool,

    /// Lock the token selector showing this mint
    #[arg(long)]
    pub fixed_mint: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
