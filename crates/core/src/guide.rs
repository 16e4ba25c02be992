//! Built-in knowledge pages: how the program fits together, common pain
//! fixes, nutrition and mindset.

use std::fmt;
use std::str::FromStr;

use crate::error::ProgressError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuideTopic {
    #[default]
    System,
    Doctor,
    Nutrition,
    Mind,
}

impl GuideTopic {
    pub const ALL: [GuideTopic; 4] = [
        GuideTopic::System,
        GuideTopic::Doctor,
        GuideTopic::Nutrition,
        GuideTopic::Mind,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GuideTopic::System => "system",
            GuideTopic::Doctor => "doctor",
            GuideTopic::Nutrition => "nutrition",
            GuideTopic::Mind => "mind",
        }
    }

    #[must_use]
    pub fn page(self) -> &'static GuidePage {
        match self {
            GuideTopic::System => &SYSTEM,
            GuideTopic::Doctor => &DOCTOR,
            GuideTopic::Nutrition => &NUTRITION,
            GuideTopic::Mind => &MIND,
        }
    }
}

impl fmt::Display for GuideTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuideTopic {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(GuideTopic::System),
            "doctor" => Ok(GuideTopic::Doctor),
            "nutrition" => Ok(GuideTopic::Nutrition),
            "mind" => Ok(GuideTopic::Mind),
            _ => Err(ProgressError::UnknownGuideTopic(s.to_owned())),
        }
    }
}

/// One titled point on a guide page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideEntry {
    pub heading: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuidePage {
    pub title: &'static str,
    pub entries: &'static [GuideEntry],
    /// Closing quote shown under the entries, if any.
    pub closing: Option<&'static str>,
}

//
// ─── PAGES ────────────────────────────────────────────────────────────────────
//

static SYSTEM: GuidePage = GuidePage {
    title: "Centurion architecture",
    entries: &[
        GuideEntry {
            heading: "1. Training (quality)",
            body: "Your main engine. Three sessions a week built on periodization. \
                   Every set target is a percentage of your current max.",
        },
        GuideEntry {
            heading: "2. Daily goal (quantity)",
            body: "Keeps you moving every day. If the workout does not cover the goal, \
                   make up the rest with easy grease-the-groove sets spread over the day.",
        },
        GuideEntry {
            heading: "3. Max test (evolution)",
            body: "The moment of truth at the end of each phase. A new max updates \
                   the load of every future workout.",
        },
    ],
    closing: Some(
        "Training builds you, the daily goal maintains you and the max test moves you forward.",
    ),
};

static DOCTOR: GuidePage = GuidePage {
    title: "Pain diagnostics",
    entries: &[
        GuideEntry {
            heading: "Wrist pain",
            body: "Use parallettes or do push-ups on your fists so the wrist stays straight.",
        },
        GuideEntry {
            heading: "Sagging lower back",
            body: "Squeeze the glutes and brace the abs into a hollow-body position.",
        },
    ],
    closing: None,
};

static NUTRITION: GuidePage = GuidePage {
    title: "Fuel for muscles",
    entries: &[
        GuideEntry {
            heading: "Protein",
            body: "Aim for 1.6 to 2 g per kg of body weight to repair muscle fibers.",
        },
        GuideEntry {
            heading: "Creatine",
            body: "5 g a day. Raises ATP stores for explosive sets.",
        },
        GuideEntry {
            heading: "Magnesium",
            body: "Before sleep. Helps muscles relax and prevents cramps.",
        },
    ],
    closing: None,
};

static MIND: GuidePage = GuidePage {
    title: "Mental warrior",
    entries: &[
        GuideEntry {
            heading: "The 40% rule",
            body: "When your mind says you are done, you are only at 40% of your physical \
                   capacity. Learn to ignore the signal to quit.",
        },
        GuideEntry {
            heading: "Self-talk",
            body: "Tell yourself \"this is easy\" on the way down. Your body follows orders.",
        },
    ],
    closing: None,
};
