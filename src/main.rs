use anyhow::Result;

fn main() -> Result<()> {
    streamit_migrate::cli::run()
}
