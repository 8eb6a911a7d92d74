use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The editable profile blurb shown in the site header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub interests: String,
    /// Plans after graduation.
    #[serde(default)]
    pub plans: String,
}

/// One skill block on the Skills/Experience page.
///
/// Empty strings mean "absent" — the fixtures use `""` rather than omitting
/// fields, and the renderer skips empty values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub item: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub timeframe: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, rename = "linkCaption")]
    pub link_caption: String,
}

/// Skills grouped as section type → list name → blocks, in fixture order.
pub type SkillBook = IndexMap<String, IndexMap<String, Vec<Skill>>>;

/// One module result on the Education page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    pub id: String,
    pub name: String,
    pub mark: u32,
    #[serde(default)]
    pub icon: String,
}

/// Every mark sheet the Education page renders: six university semesters
/// plus the NSC finals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkBook {
    pub year1sem1: Vec<Mark>,
    pub year1sem2: Vec<Mark>,
    pub year2sem1: Vec<Mark>,
    pub year2sem2: Vec<Mark>,
    pub year3sem1: Vec<Mark>,
    pub year3sem2: Vec<Mark>,
    #[serde(rename = "NSC")]
    pub nsc: Vec<Mark>,
}

impl MarkBook {
    /// Semester sheets paired with display labels, newest year first, the
    /// order the Education page shows them in.
    pub fn semesters(&self) -> Vec<(&'static str, &[Mark])> {
        vec![
            ("Year 3, Semester 1", &self.year3sem1),
            ("Year 3, Semester 2", &self.year3sem2),
            ("Year 2, Semester 1", &self.year2sem1),
            ("Year 2, Semester 2", &self.year2sem2),
            ("Year 1, Semester 1", &self.year1sem1),
            ("Year 1, Semester 2", &self.year1sem2),
        ]
    }
}
