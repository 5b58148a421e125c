use clap::{Parser, ValueEnum};

// Some defaults; some of which can be overriden via CLI args
const CONFIG_FILE_PATH: &str = "./fingerTracking.json";

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    /// One JSON document per line, per frame
    Json,
    /// Concatenated MessagePack documents, one per frame
    #[value(name = "msgpack")]
    MsgPack,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Where to load the detector config; defaults are used if the file does not exist
    #[arg(long = "configPath", default_value_t = String::from(CONFIG_FILE_PATH))]
    pub config_path: String,

    /// Write the default detector config to configPath, then exit
    #[arg(long = "writeDefaultConfig")]
    pub write_default_config: bool,

    /// Optional JSON file with depth and colour camera intrinsics; nominal
    /// Kinect v2 values are used otherwise
    #[arg(long = "intrinsicsPath")]
    pub intrinsics_path: Option<String>,

    /// Directory of recorded frames: each NAME.depth (raw little-endian u16
    /// samples) alongside NAME.bodies.json
    #[arg(long = "recording")]
    pub recording: Option<String>,

    /// Where to write detected hands; stdout if omitted
    #[arg(long = "output")]
    pub output: Option<String>,

    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    #[arg(long = "loglevel", default_value_t = String::from("info"))]
    pub log_level: String,
}
