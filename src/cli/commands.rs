use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "po", about = concat!("[~] portico v", env!("CARGO_PKG_VERSION"), " - your site is plain JSON"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different site directory
    #[arg(short = 'C', long = "site-dir", global = true)]
    pub site_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new portico site in the current directory
    Init(InitArgs),
    /// List blog posts with optional search, tag filter, and date order
    List(ListArgs),
    /// Show a single post
    Show(ShowArgs),
    /// Create a new post (admin only)
    New,
    /// Set a post's title
    Title(TitleArgs),
    /// Add a tag to a post
    Tag(TagArgs),
    /// Replace a post's tag list
    Retag(RetagArgs),
    /// Set or append a paragraph in a post's body
    Para(ParaArgs),
    /// Append an empty image group to a post's body
    Pics(PicsArgs),
    /// Add an image file to one of a post's image groups
    Pic(PicArgs),
    /// Remove one image from an image group
    Rmpic(RmpicArgs),
    /// Delete a body block
    Rmblock(RmblockArgs),
    /// Log in
    Login(LoginArgs),
    /// Log out
    Logout,
    /// Show the current session
    Whoami,
    /// Show the profile blurb
    Profile,
    /// Set the profile interests text (admin only)
    Interests(TextArgs),
    /// Set the plans-after-graduation text (admin only)
    Plans(TextArgs),
    /// Set the profile picture from an image file (admin only)
    Avatar(AvatarArgs),
    /// Show the skills / experience sections
    Skills,
    /// Show education marks
    Marks,
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Site name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Reinitialize even if portico/ already exists
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Only posts whose title contains this term (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,
    /// Only posts carrying at least one of these tags (repeatable)
    #[arg(long)]
    pub tag: Vec<String>,
    /// Date order: newest or oldest
    #[arg(long, default_value = "newest")]
    pub sort: String,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Post index to show
    pub index: usize,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TitleArgs {
    /// Post index to edit
    pub index: usize,
    /// New title
    pub title: String,
}

#[derive(Args)]
pub struct TagArgs {
    /// Post index to edit
    pub index: usize,
    /// Tag to add (trimmed and lowercased)
    pub tag: String,
}

#[derive(Args)]
pub struct RetagArgs {
    /// Post index to edit
    pub index: usize,
    /// Replacement tag list (may be empty)
    pub tags: Vec<String>,
}

#[derive(Args)]
pub struct ParaArgs {
    /// Post index to edit
    pub index: usize,
    /// Paragraph text
    pub text: String,
    /// Body position to replace (default: append at the end)
    #[arg(long)]
    pub at: Option<usize>,
}

#[derive(Args)]
pub struct PicsArgs {
    /// Post index to edit
    pub index: usize,
}

#[derive(Args)]
pub struct PicArgs {
    /// Post index to edit
    pub index: usize,
    /// Body position of the image group
    pub block: usize,
    /// Image file to add
    pub file: String,
}

#[derive(Args)]
pub struct RmpicArgs {
    /// Post index to edit
    pub index: usize,
    /// Body position of the image group
    pub block: usize,
    /// Position of the image within the group
    pub image: usize,
}

#[derive(Args)]
pub struct RmblockArgs {
    /// Post index to edit
    pub index: usize,
    /// Body position to delete
    pub block: usize,
}

// ---------------------------------------------------------------------------
// Session and profile args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct LoginArgs {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

#[derive(Args)]
pub struct TextArgs {
    /// Replacement text
    pub text: String,
}

#[derive(Args)]
pub struct AvatarArgs {
    /// Image file to use as the profile picture
    pub file: String,
}
