use serde::Serialize;

use crate::model::content::{Mark, MarkBook, Profile, SkillBook};
use crate::model::post::{BodyBlock, Post};
use crate::ops::filter::split_by_substring;
use crate::util::text::truncate_to_width;

/// Widest a plain title gets in list output before truncation.
const LIST_TITLE_WIDTH: usize = 60;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct PostSummaryJson {
    pub index: usize,
    pub title: String,
    pub date: String,
    pub tags: Vec<String>,
}

#[derive(Serialize)]
pub struct PostJson {
    pub index: usize,
    pub title: String,
    pub date: String,
    pub tags: Vec<String>,
    pub body: Vec<BodyBlock>,
}

#[derive(Serialize)]
pub struct SessionJson {
    pub username: String,
    pub admin: bool,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn post_summary(index: usize, post: &Post) -> PostSummaryJson {
    PostSummaryJson {
        index,
        title: post.title.clone(),
        date: post.date.clone(),
        tags: post.tags.clone(),
    }
}

pub fn post_to_json(index: usize, post: &Post) -> PostJson {
    PostJson {
        index,
        title: post.title.clone(),
        date: post.date.clone(),
        tags: post.tags.clone(),
        body: post.body.clone(),
    }
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// One line of `po list` output. The segment of the title matching the
/// search term is bracketed, standing in for the site's highlight span.
pub fn format_list_line(index: usize, post: &Post, search_term: &str) -> String {
    let split = split_by_substring(&post.title, search_term);
    let title = if split.matched.is_empty() {
        truncate_to_width(&post.title, LIST_TITLE_WIDTH)
    } else {
        format!("{}[{}]{}", split.prefix, split.matched, split.suffix)
    };

    let date = if post.date.trim().is_empty() {
        "(undated)".to_string()
    } else {
        post.date.clone()
    };

    let mut line = format!("[{}] {}  {}", index, date, title);
    for tag in &post.tags {
        line.push_str("  #");
        line.push_str(tag);
    }
    line
}

/// Compact label for an image reference. Persisted pictures can be whole
/// data URLs, which would swamp a terminal.
pub fn image_label(image: &str) -> String {
    match image.split_once(';') {
        Some((head, _)) if head.starts_with("data:") => {
            format!("{} ({} chars)", head, image.len())
        }
        _ => image.to_string(),
    }
}

/// Full single-post view.
pub fn render_post(index: usize, post: &Post) -> String {
    let mut out = String::new();
    out.push_str(&format!("[{}] {}\n", index, post.title));
    out.push_str(&format!("Date created: {}\n", post.date));
    out.push_str(&format!("Tags: {}\n", post.tags.join(", ")));

    for (i, block) in post.body.iter().enumerate() {
        out.push('\n');
        match block {
            BodyBlock::Text { text } => {
                out.push_str(&format!("  ({}) {}\n", i, text));
            }
            BodyBlock::Images { images } => {
                let labels: Vec<String> = images.iter().map(|img| image_label(img)).collect();
                out.push_str(&format!("  ({}) images: {}\n", i, labels.join(", ")));
            }
        }
    }
    out
}

/// The header profile blurb.
pub fn render_profile(profile: &Profile) -> String {
    format!(
        "Interests\n  {}\n\nPlans after graduation\n  {}\n",
        profile.interests, profile.plans
    )
}

/// The Skills/Experience page.
pub fn render_skills(book: &SkillBook) -> String {
    let mut out = String::new();
    for (section, lists) in book {
        out.push_str(&format!("== {} ==\n", section));
        for (name, skills) in lists {
            out.push_str(&format!("-- {} --\n", name));
            for skill in skills {
                if skill.timeframe.is_empty() {
                    out.push_str(&format!("{}\n", skill.item));
                } else {
                    out.push_str(&format!("{} ({})\n", skill.item, skill.timeframe));
                }
                if !skill.body.is_empty() {
                    out.push_str(&format!("    {}\n", skill.body));
                }
                if !skill.link.is_empty() {
                    let caption = if skill.link_caption.is_empty() {
                        "link"
                    } else {
                        skill.link_caption.as_str()
                    };
                    out.push_str(&format!("    {}: {}\n", caption, skill.link));
                }
            }
        }
        out.push('\n');
    }
    out
}

fn render_sheet(out: &mut String, heading: &str, marks: &[Mark]) {
    out.push_str(&format!("{}\n", heading));
    for mark in marks {
        out.push_str(&format!("  {}  ({})\n", mark.name, mark.mark));
    }
}

/// The Education page mark sheets.
pub fn render_marks(book: &MarkBook) -> String {
    let mut out = String::new();
    out.push_str("== University ==\n");
    for (heading, sheet) in book.semesters() {
        render_sheet(&mut out, heading, sheet);
    }
    out.push_str("\n== NSC Final Marks ==\n");
    for mark in &book.nsc {
        out.push_str(&format!("  {}  ({})\n", mark.name, mark.mark));
    }
    out
}
