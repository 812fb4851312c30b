//! Deterministic renovation plan rule table.
//!
//! Suggestions, aggregate cost, estimated value added, and the
//! target-appearance description are all derived purely from the room
//! type, style, and budget tier inputs. No model call is involved, so
//! the analysis phase is fast, reproducible, and can be written to the
//! project record before the (slow, fallible) image step begins.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Budget tiers
// ---------------------------------------------------------------------------

/// Budget tier parsed from the free-text budget input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Low,
    Medium,
    High,
}

impl BudgetTier {
    /// Parse a tier keyword out of the free-text budget field.
    ///
    /// The upload form appends a tier word to the dollar figure
    /// (e.g. `"$5000 high"`). Unknown or missing keywords default to
    /// `Medium`.
    pub fn from_text(budget: &str) -> Self {
        let lower = budget.to_lowercase();
        if lower.contains("high") || lower.contains("premium") {
            Self::High
        } else if lower.contains("low") || lower.contains("budget") {
            Self::Low
        } else {
            Self::Medium
        }
    }

    /// Human-readable label used in the edit instruction.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "modest",
            Self::Medium => "mid-range",
            Self::High => "generous",
        }
    }
}

// ---------------------------------------------------------------------------
// Room kinds
// ---------------------------------------------------------------------------

/// Recognized room categories. Anything else falls back to a generic
/// refresh plan rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomKind {
    Kitchen,
    Bathroom,
    Bedroom,
    LivingRoom,
    Other,
}

impl RoomKind {
    /// Classify a free-text room type.
    pub fn from_text(room_type: &str) -> Self {
        let lower = room_type.to_lowercase();
        if lower.contains("kitchen") {
            Self::Kitchen
        } else if lower.contains("bath") {
            Self::Bathroom
        } else if lower.contains("bed") {
            Self::Bedroom
        } else if lower.contains("living") || lower.contains("lounge") {
            Self::LivingRoom
        } else {
            Self::Other
        }
    }

    /// Value-added multiplier applied to the plan's total cost,
    /// expressed in tenths (25 -> 2.5x). Kitchens and bathrooms return
    /// the most resale value per renovation dollar.
    fn value_multiplier_tenths(self) -> i64 {
        match self {
            Self::Kitchen => 25,
            Self::Bathroom => 20,
            Self::Bedroom | Self::LivingRoom | Self::Other => 15,
        }
    }
}

// ---------------------------------------------------------------------------
// Plan types
// ---------------------------------------------------------------------------

/// A single improvement suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub item: String,
    pub description: String,
    /// Estimated cost in whole dollars.
    pub cost: i64,
}

/// The full deterministic analysis for one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenovationPlan {
    /// Ordered improvement suggestions.
    pub suggestions: Vec<Suggestion>,
    /// Sum of suggestion costs, dollars.
    pub estimated_cost: i64,
    /// Estimated resale value added, dollars.
    pub estimated_value_added: i64,
    /// Free-text description of the renovated room's appearance. Also
    /// feeds the provider edit instruction.
    pub target_appearance: String,
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// (item, description, cost) rows per room kind and budget tier.
fn suggestion_rows(room: RoomKind, tier: BudgetTier) -> &'static [(&'static str, &'static str, i64)] {
    use BudgetTier::*;
    use RoomKind::*;
    match (room, tier) {
        (Kitchen, High) => &[
            (
                "Cabinet refacing",
                "Reface cabinet doors and drawer fronts, add soft-close hardware",
                2500,
            ),
            (
                "Countertop upgrade",
                "Replace worn counters with engineered quartz surfaces",
                2000,
            ),
            (
                "Lighting overhaul",
                "Swap dated fixtures for layered LED task and accent lighting",
                600,
            ),
            (
                "Tile backsplash",
                "Install a full-height ceramic backsplash behind the range and sink",
                900,
            ),
        ],
        (Kitchen, Medium) => &[
            (
                "Cabinet repaint",
                "Repaint cabinet boxes and doors, replace pulls and hinges",
                1200,
            ),
            (
                "Lighting overhaul",
                "Swap dated fixtures for layered LED task and accent lighting",
                600,
            ),
            (
                "Tile backsplash",
                "Install a ceramic backsplash behind the range and sink",
                900,
            ),
        ],
        (Kitchen, Low) => &[
            (
                "Paint refresh",
                "Repaint walls and cabinet fronts in a light neutral",
                800,
            ),
            (
                "Hardware swap",
                "Replace cabinet pulls, hinges, and the faucet",
                300,
            ),
        ],
        (Bathroom, High) => &[
            (
                "Vanity replacement",
                "Install a new vanity with an integrated stone top",
                1800,
            ),
            (
                "Tile refresh",
                "Retile the wet walls and floor with porcelain tile",
                1500,
            ),
            (
                "Fixture upgrade",
                "Replace the faucet, shower trim, and towel hardware",
                900,
            ),
        ],
        (Bathroom, Medium) => &[
            (
                "Vanity refinish",
                "Repaint the vanity and fit a new counter top and sink",
                1000,
            ),
            (
                "Fixture upgrade",
                "Replace the faucet, shower trim, and towel hardware",
                900,
            ),
            (
                "Lighting update",
                "Replace the vanity light bar and add a dimmer",
                300,
            ),
        ],
        (Bathroom, Low) => &[
            (
                "Regrout and caulk",
                "Regrout the tile and recaulk the tub surround",
                400,
            ),
            (
                "Paint refresh",
                "Repaint walls and ceiling with moisture-resistant paint",
                300,
            ),
        ],
        (Bedroom, High) => &[
            (
                "Built-in wardrobe",
                "Fit floor-to-ceiling wardrobe storage along one wall",
                1800,
            ),
            (
                "Flooring refresh",
                "Replace worn carpet with engineered wood flooring",
                800,
            ),
            (
                "Lighting update",
                "Add bedside sconces and a dimmable ceiling fixture",
                400,
            ),
        ],
        (Bedroom, Medium) => &[
            (
                "Paint refresh",
                "Repaint walls and trim in a calm two-tone scheme",
                600,
            ),
            (
                "Lighting update",
                "Add bedside sconces and a dimmable ceiling fixture",
                400,
            ),
            (
                "Closet organizers",
                "Fit modular organizers into the existing closet",
                500,
            ),
        ],
        (Bedroom, Low) => &[
            (
                "Paint refresh",
                "Repaint walls and trim in a calm neutral",
                400,
            ),
            (
                "Soft furnishings",
                "Replace curtains and switch plates, add a rug",
                200,
            ),
        ],
        (LivingRoom, High) => &[
            (
                "Flooring replacement",
                "Replace flooring with wide-plank engineered wood",
                1800,
            ),
            (
                "Feature wall",
                "Add a panelled feature wall with integrated shelving",
                800,
            ),
            (
                "Lighting overhaul",
                "Layer recessed, floor, and accent lighting on dimmers",
                1000,
            ),
        ],
        (LivingRoom, Medium) => &[
            (
                "Paint refresh",
                "Repaint walls and ceiling, accent the chimney breast",
                700,
            ),
            (
                "Lighting update",
                "Replace the main fixture and add floor lamps on dimmers",
                600,
            ),
            (
                "Trim and shelving",
                "Refresh skirting and window trim, add wall shelving",
                500,
            ),
        ],
        (LivingRoom, Low) => &[
            (
                "Paint refresh",
                "Repaint walls in a warm neutral",
                500,
            ),
            (
                "Lighting update",
                "Replace the main fixture and add a floor lamp",
                300,
            ),
        ],
        (Other, High) => &[
            (
                "Paint refresh",
                "Repaint walls, ceiling, and trim throughout",
                900,
            ),
            (
                "Flooring refresh",
                "Replace or refinish the flooring",
                1000,
            ),
            (
                "Lighting update",
                "Replace dated fixtures with layered LED lighting",
                500,
            ),
        ],
        (Other, Medium) => &[
            (
                "Paint refresh",
                "Repaint walls, ceiling, and trim throughout",
                900,
            ),
            (
                "Lighting update",
                "Replace dated fixtures with layered LED lighting",
                500,
            ),
        ],
        (Other, Low) => &[(
            "Paint refresh",
            "Repaint walls and trim in a light neutral",
            600,
        )],
    }
}

/// Style flavor sentence appended to the target-appearance text.
fn style_sentence(style: &str) -> &'static str {
    let lower = style.to_lowercase();
    if lower.contains("modern") || lower.contains("contemporary") {
        "Clean lines, handleless fronts, and a muted palette with matte black accents."
    } else if lower.contains("rustic") || lower.contains("farmhouse") {
        "Warm timber textures, visible grain, and aged metal accents."
    } else if lower.contains("scandi") || lower.contains("minimal") {
        "Pale woods, white surfaces, and uncluttered open sight lines."
    } else if lower.contains("industrial") {
        "Exposed materials, dark metal frames, and utilitarian fittings."
    } else if lower.contains("traditional") || lower.contains("classic") {
        "Panelled detailing, brass hardware, and a balanced symmetric layout."
    } else {
        "A cohesive palette and coordinated fixtures throughout."
    }
}

// ---------------------------------------------------------------------------
// Plan construction
// ---------------------------------------------------------------------------

/// Build the deterministic renovation plan for a project's inputs.
///
/// The same (room type, style, budget) always yields the same plan.
pub fn build_plan(room_type: &str, style: &str, budget: &str) -> RenovationPlan {
    let room = RoomKind::from_text(room_type);
    let tier = BudgetTier::from_text(budget);

    let suggestions: Vec<Suggestion> = suggestion_rows(room, tier)
        .iter()
        .map(|(item, description, cost)| Suggestion {
            item: (*item).to_string(),
            description: (*description).to_string(),
            cost: *cost,
        })
        .collect();

    let estimated_cost: i64 = suggestions.iter().map(|s| s.cost).sum();
    let estimated_value_added = estimated_cost * room.value_multiplier_tenths() / 10;

    let focus = suggestions
        .iter()
        .map(|s| s.item.to_lowercase())
        .collect::<Vec<_>>()
        .join(", ");
    let target_appearance = format!(
        "A {} {} featuring {}. {}",
        style.trim().to_lowercase(),
        room_type.trim().to_lowercase(),
        focus,
        style_sentence(style),
    );

    RenovationPlan {
        suggestions,
        estimated_cost,
        estimated_value_added,
        target_appearance,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
