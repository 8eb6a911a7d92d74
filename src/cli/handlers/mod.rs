mod init;
pub use init::cmd_init;

use std::path::PathBuf;
use std::sync::Mutex;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::lock::StoreLock;
use crate::io::repos::{self, RepoError};
use crate::io::site_io::{self, Site, SiteError};
use crate::model::draft::DraftEditor;
use crate::model::post::{BodyBlock, Post};
use crate::ops::filter::{self, SortOrder};
use crate::ops::{auth, images, tag_flow};

/// Global override for site directory (set by -C flag)
static SITE_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;

    // Store -C override for load_site_cwd()
    if let Some(ref dir) = cli.site_dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        SITE_DIR_OVERRIDE.lock().unwrap().replace(abs);
    }

    match cli.command {
        // Init is handled in main.rs before site discovery
        Commands::Init(args) => cmd_init(args),

        // Read commands
        Commands::List(args) => cmd_list(args, json),
        Commands::Show(args) => cmd_show(args, json),
        Commands::Whoami => cmd_whoami(json),
        Commands::Profile => cmd_profile(json),
        Commands::Skills => cmd_skills(json),
        Commands::Marks => cmd_marks(json),

        // Session commands
        Commands::Login(args) => cmd_login(args),
        Commands::Logout => cmd_logout(),

        // Write commands
        Commands::New => cmd_new(json),
        Commands::Title(args) => cmd_title(args),
        Commands::Tag(args) => cmd_tag(args),
        Commands::Retag(args) => cmd_retag(args),
        Commands::Para(args) => cmd_para(args),
        Commands::Pics(args) => cmd_pics(args),
        Commands::Pic(args) => cmd_pic(args),
        Commands::Rmpic(args) => cmd_rmpic(args),
        Commands::Rmblock(args) => cmd_rmblock(args),
        Commands::Interests(args) => cmd_interests(args),
        Commands::Plans(args) => cmd_plans(args),
        Commands::Avatar(args) => cmd_avatar(args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn start_dir() -> Result<PathBuf, SiteError> {
    match SITE_DIR_OVERRIDE.lock().unwrap().as_ref() {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir().map_err(SiteError::IoError),
    }
}

fn load_site_cwd() -> Result<Site, SiteError> {
    let root = site_io::discover_site(&start_dir()?)?;
    site_io::load_site(&root)
}

/// Load the site with the store lock held, for commands that write.
/// The lock must be taken before reading so the read-modify-write cannot
/// interleave with another invocation.
fn load_site_locked() -> Result<(Site, StoreLock), Box<dyn std::error::Error>> {
    let root = site_io::discover_site(&start_dir()?)?;
    let lock = StoreLock::acquire_default(&root.join(site_io::SITE_DIR_NAME))?;
    let site = site_io::load_site(&root)?;
    Ok((site, lock))
}

fn parse_sort(sort: &str) -> Result<SortOrder, String> {
    match sort {
        "newest" => Ok(SortOrder::Newest),
        "oldest" => Ok(SortOrder::Oldest),
        other => Err(format!("invalid sort order '{}' (use newest or oldest)", other)),
    }
}

/// Editability gate: mutating commands require the admin session.
fn require_admin(site: &Site) -> CmdResult {
    if site.is_admin_session()? {
        Ok(())
    } else {
        Err(format!(
            "you must be logged in as {} to edit this site",
            site.config.site.admin
        )
        .into())
    }
}

/// Run one editing operation against the post at `index`: open a draft,
/// apply `edit`, and commit back through the repository if `edit` says so.
/// `edit` returns whether the draft should be committed.
fn with_draft<F>(index: usize, edit: F) -> CmdResult
where
    F: FnOnce(&mut DraftEditor, &mut Site) -> Result<bool, Box<dyn std::error::Error>>,
{
    let (mut site, _lock) = load_site_locked()?;
    require_admin(&site)?;

    let post = site
        .posts
        .get(index)
        .ok_or(RepoError::OutOfRange(index))?
        .clone();
    let mut editor = DraftEditor::new();
    editor.open(index, &post);

    if edit(&mut editor, &mut site)? {
        let (origin, draft) = editor.commit()?;
        site.posts.replace_at(&site.store, origin, draft)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, json: bool) -> CmdResult {
    let site = load_site_cwd()?;
    let order = parse_sort(&args.sort)?;
    let search = args.search.unwrap_or_default();

    let ordering = filter::select_and_order(site.posts.posts(), &search, &args.tag, order);

    if json {
        let summaries: Vec<PostSummaryJson> = ordering
            .iter()
            .map(|&i| post_summary(i, &site.posts.posts()[i]))
            .collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else if ordering.is_empty() {
        println!("No posts match.");
    } else {
        for &i in &ordering {
            println!("{}", format_list_line(i, &site.posts.posts()[i], &search));
        }
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, json: bool) -> CmdResult {
    let site = load_site_cwd()?;
    let post = site
        .posts
        .get(args.index)
        .ok_or(RepoError::OutOfRange(args.index))?;

    // Viewing goes through a read-only draft session, the same surface the
    // editor uses; non-admin sessions just never get the mutating commands.
    let mut editor = DraftEditor::new();
    editor.open(args.index, post);
    let draft = editor.draft().ok_or(crate::model::draft::DraftError::Closed)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&post_to_json(args.index, draft))?
        );
    } else {
        print!("{}", render_post(args.index, draft));
    }
    Ok(())
}

fn cmd_whoami(json: bool) -> CmdResult {
    let site = load_site_cwd()?;
    let username = site.current_username()?;
    let admin = site.config.is_admin(&username);

    if json {
        let session = SessionJson { username, admin };
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else if username.is_empty() {
        println!("Not logged in");
    } else if admin {
        println!("Logged in as {} (admin)", username);
    } else {
        println!("Logged in as {}", username);
    }
    Ok(())
}

fn cmd_profile(json: bool) -> CmdResult {
    let site = load_site_cwd()?;
    if json {
        println!("{}", serde_json::to_string_pretty(site.profile.profile())?);
    } else {
        print!("{}", render_profile(site.profile.profile()));
        let has_avatar = site.store.contains(repos::PROFILE_PIC_KEY);
        if has_avatar {
            println!("\nProfile picture: set");
        } else {
            println!("\nProfile picture: default");
        }
    }
    Ok(())
}

fn cmd_skills(json: bool) -> CmdResult {
    let book = repos::load_skills();
    if json {
        println!("{}", serde_json::to_string_pretty(&book)?);
    } else {
        print!("{}", render_skills(&book));
    }
    Ok(())
}

fn cmd_marks(json: bool) -> CmdResult {
    let book = repos::load_marks();
    if json {
        println!("{}", serde_json::to_string_pretty(&book)?);
    } else {
        print!("{}", render_marks(&book));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Session commands
// ---------------------------------------------------------------------------

fn cmd_login(args: LoginArgs) -> CmdResult {
    let (site, _lock) = load_site_locked()?;
    let outcome = auth::attempt(&site.users, &args.username, &args.password);
    if let auth::LoginOutcome::Success(ref username) = outcome {
        site.set_username(username)?;
    }
    println!("{}", outcome.message());
    Ok(())
}

fn cmd_logout() -> CmdResult {
    let (site, _lock) = load_site_locked()?;
    site.set_username("")?;
    println!("Logged out");
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_new(json: bool) -> CmdResult {
    let (mut site, _lock) = load_site_locked()?;
    require_admin(&site)?;

    let index = site.posts.append(&site.store, Post::new_today())?;
    if json {
        println!("{}", serde_json::json!({ "index": index }));
    } else {
        println!("Created post {}", index);
    }
    Ok(())
}

fn cmd_title(args: TitleArgs) -> CmdResult {
    with_draft(args.index, |editor, _site| {
        editor.set_title(args.title.clone())?;
        Ok(true)
    })?;
    println!("Updated title of post {}", args.index);
    Ok(())
}

fn cmd_tag(args: TagArgs) -> CmdResult {
    with_draft(args.index, |editor, site| {
        let outcome = tag_flow::add_tag(editor, &mut site.tags, &site.store, &args.tag)?;
        println!("{}", outcome.message());
        Ok(matches!(
            outcome,
            tag_flow::TagOutcome::CreatedGlobally(_) | tag_flow::TagOutcome::AddedKnown(_)
        ))
    })
}

fn cmd_retag(args: RetagArgs) -> CmdResult {
    with_draft(args.index, |editor, _site| {
        // Same normalization as single adds; duplicates keep their first slot.
        let mut tags: Vec<String> = Vec::new();
        for tag in &args.tags {
            let tag = tag.trim().to_lowercase();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        editor.set_tags(tags)?;
        Ok(true)
    })?;
    println!("Replaced tags of post {}", args.index);
    Ok(())
}

fn cmd_para(args: ParaArgs) -> CmdResult {
    with_draft(args.index, |editor, _site| {
        let draft = editor.draft().ok_or(crate::model::draft::DraftError::Closed)?;
        let at = args.at.unwrap_or(draft.body.len());
        editor.set_body_item(at, BodyBlock::text(args.text.clone()))?;
        Ok(true)
    })?;
    println!("Updated body of post {}", args.index);
    Ok(())
}

fn cmd_pics(args: PicsArgs) -> CmdResult {
    with_draft(args.index, |editor, _site| {
        let draft = editor.draft().ok_or(crate::model::draft::DraftError::Closed)?;
        let at = draft.body.len();
        editor.set_body_item(at, BodyBlock::empty_images())?;
        println!("Added image group at block {}", at);
        Ok(true)
    })
}

fn cmd_pic(args: PicArgs) -> CmdResult {
    with_draft(args.index, |editor, _site| {
        let draft = editor.draft().ok_or(crate::model::draft::DraftError::Closed)?;
        let mut group = match draft.body.get(args.block) {
            Some(BodyBlock::Images { images }) => images.clone(),
            Some(BodyBlock::Text { .. }) => {
                return Err(format!("block {} is a paragraph, not an image group", args.block).into());
            }
            None => {
                return Err(format!("post {} has no block {}", args.index, args.block).into());
            }
        };

        let url = images::read_data_url(Some(std::path::Path::new(&args.file)))?;
        if url.is_empty() {
            println!("No picture selected");
            return Ok(false);
        }
        group.push(url);
        editor.set_body_item(args.block, BodyBlock::images(group))?;
        println!("Added image to block {}", args.block);
        Ok(true)
    })
}

fn cmd_rmpic(args: RmpicArgs) -> CmdResult {
    with_draft(args.index, |editor, _site| {
        let draft = editor.draft().ok_or(crate::model::draft::DraftError::Closed)?;
        let mut group = match draft.body.get(args.block) {
            Some(BodyBlock::Images { images }) => images.clone(),
            _ => {
                return Err(format!("post {} has no image group at block {}", args.index, args.block).into());
            }
        };
        if args.image >= group.len() {
            println!("No image {} in block {}; nothing removed", args.image, args.block);
            return Ok(false);
        }
        group.remove(args.image);
        editor.set_body_item(args.block, BodyBlock::images(group))?;
        println!("Removed image {} from block {}", args.image, args.block);
        Ok(true)
    })
}

fn cmd_rmblock(args: RmblockArgs) -> CmdResult {
    with_draft(args.index, |editor, _site| {
        let draft = editor.draft().ok_or(crate::model::draft::DraftError::Closed)?;
        if args.block >= draft.body.len() {
            // Deleting past the end is harmless, but say so.
            println!("No body block {}; nothing deleted", args.block);
            return Ok(false);
        }
        editor.delete_body_item(args.block)?;
        println!("Deleted block {}", args.block);
        Ok(true)
    })
}

fn cmd_interests(args: TextArgs) -> CmdResult {
    let (mut site, _lock) = load_site_locked()?;
    require_admin(&site)?;
    site.profile.set_interests(&site.store, &args.text)?;
    println!("Updated interests");
    Ok(())
}

fn cmd_plans(args: TextArgs) -> CmdResult {
    let (mut site, _lock) = load_site_locked()?;
    require_admin(&site)?;
    site.profile.set_plans(&site.store, &args.text)?;
    println!("Updated plans");
    Ok(())
}

fn cmd_avatar(args: AvatarArgs) -> CmdResult {
    let (site, _lock) = load_site_locked()?;
    require_admin(&site)?;

    let url = images::read_data_url(Some(std::path::Path::new(&args.file)))?;
    if url.is_empty() {
        println!("No picture selected");
        return Ok(());
    }
    site.store.write(repos::PROFILE_PIC_KEY, &url)?;
    println!("Profile picture updated");
    Ok(())
}
