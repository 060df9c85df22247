use anyhow::Result;

use fcm_composer::cli::CliApp;

fn main() -> Result<()> {
    CliApp::run()
}
