use std::fs;

use crate::cli::commands::InitArgs;
use crate::io::site_io::SITE_DIR_NAME;

const SITE_TOML_TEMPLATE: &str = r##"[site]
name = "{name}"

# The one username allowed to create and edit content. Change this together
# with the users blob in store/ if you rename the account.
admin = "Algor"
"##;

/// Handle `po init`: scaffold the site data directory.
pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let site_dir = cwd.join(SITE_DIR_NAME);

    if site_dir.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to reinitialize)",
            site_dir.display()
        )
        .into());
    }

    let name = match args.name {
        Some(name) => name,
        None => cwd
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("my site")
            .to_string(),
    };

    fs::create_dir_all(site_dir.join("store"))?;
    let config = SITE_TOML_TEMPLATE.replace("{name}", &name);
    fs::write(site_dir.join("site.toml"), config)?;

    println!("Initialized portico site \"{}\" in {}", name, site_dir.display());
    println!("Content starts from the bundled defaults; edits persist under store/.");
    Ok(())
}
