use crate::config::{RenderConfig, ServiceEndpoints};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{ArgAction, Parser};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "bibfetch")]
#[command(about = "Build an APA bibliography from URLs, DOIs, PMCIDs, PMIDs and ISBNs")]
#[command(disable_help_flag = true)]
pub struct CliConfig {
    /// Identifiers, optionally prefixed with url:, doi:, pmcid:, pmid: or isbn:
    // 未知的 - 開頭參數也當作識別碼
    #[arg(value_name = "IDENTIFIER", allow_hyphen_values = true, trailing_var_arg = true)]
    pub identifiers: Vec<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    // 只保留 --help，-h 留給識別碼
    #[arg(long, action = ArgAction::Help, help = "Print help")]
    #[serde(skip)]
    pub help: Option<bool>,

    #[arg(skip)]
    pub endpoints: ServiceEndpoints,

    #[arg(skip)]
    pub render: RenderConfig,
}

impl ConfigProvider for CliConfig {
    fn endpoints(&self) -> &ServiceEndpoints {
        &self.endpoints
    }

    fn render_config(&self) -> &RenderConfig {
        &self.render
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.endpoints.validate()?;
        self.render.validate()
    }
}
