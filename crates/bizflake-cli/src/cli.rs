use bizflake::{BizId, BusinessType};
use clap::{Args, Parser, Subcommand, ValueEnum};
use jiff::Timestamp;
use std::fmt::{Display, Formatter};

pub const EPOCH_ENV: &str = "BIZFLAKE_EPOCH";
pub const LOG_FORMAT_ENV: &str = "BIZFLAKE_LOG_FORMAT";

pub const DEFAULT_EPOCH: &str = "2023-01-01T00:00:00Z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Text => write!(f, "text"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "bizflake", version, about = "Mint and inspect bizflake ids")]
pub struct CLI {
    /// Zero point of the time field, as an RFC 3339 instant.
    #[arg(long, global = true, env = EPOCH_ENV, default_value = DEFAULT_EPOCH)]
    pub epoch: Timestamp,

    #[arg(
        long,
        global = true,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text
    )]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Mint new ids.
    Generate(GenerateArgs),
    /// Break an id into its fields.
    Decode(DecodeArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Business type name (user, profile, account, membership, order) or number 1-15.
    #[arg(long, short = 'b')]
    pub business_type: BusinessType,

    #[arg(long, short = 'n', default_value_t = 1)]
    pub count: usize,

    /// Print ids as 0x-prefixed hex instead of decimal.
    #[arg(long)]
    pub hex: bool,
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Decimal id, or hex with a 0x prefix.
    pub id: BizId,

    /// IANA time zone to show the timestamp in, e.g. Asia/Shanghai.
    #[arg(long)]
    pub tz: Option<String>,

    #[arg(long)]
    pub json: bool,
}
