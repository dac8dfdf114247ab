/// Which end of a sibling run starts first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StaggerFrom {
    #[default]
    First,
    Last,
    Center,
    Edges,
}

/// Traversal order for grid staggering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GridDirection {
    #[default]
    Row,
    Column,
    Diagonal,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStagger {
    pub columns: u32,
    #[serde(default)]
    pub direction: GridDirection,
}

/// Per-child delay policy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaggerPolicy {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Delay step in milliseconds.
    pub amount: f64,
    #[serde(default)]
    pub from: StaggerFrom,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridStagger>,
}

fn default_true() -> bool {
    true
}

impl StaggerPolicy {
    pub fn linear(amount: f64, from: StaggerFrom) -> Self {
        Self {
            enabled: true,
            amount,
            from,
            grid: None,
        }
    }

    pub fn grid(amount: f64, columns: u32, direction: GridDirection) -> Self {
        Self {
            enabled: true,
            amount,
            from: StaggerFrom::First,
            grid: Some(GridStagger { columns, direction }),
        }
    }
}

/// Delay in milliseconds for child `index` of `total` siblings.
///
/// A disabled policy, a zero amount or an empty run yields `0`.
pub fn stagger_delay(index: usize, total: usize, policy: &StaggerPolicy) -> f64 {
    if !policy.enabled || policy.amount == 0.0 || !policy.amount.is_finite() || total == 0 {
        return 0.0;
    }
    let index = index.min(total - 1);

    let steps = match policy.grid {
        Some(grid) if grid.columns > 0 => grid_steps(index, total, grid),
        _ => linear_steps(index, total, policy.from),
    };
    steps * policy.amount
}

fn linear_steps(index: usize, total: usize, from: StaggerFrom) -> f64 {
    let i = index as f64;
    let last = (total - 1) as f64;
    let mid = last / 2.0;
    match from {
        StaggerFrom::First => i,
        StaggerFrom::Last => last - i,
        StaggerFrom::Center => (i - mid).abs(),
        StaggerFrom::Edges => mid - (i - mid).abs(),
    }
}

fn grid_steps(index: usize, total: usize, grid: GridStagger) -> f64 {
    let columns = grid.columns as usize;
    let row = index / columns;
    let col = index % columns;
    match grid.direction {
        GridDirection::Row => (row * columns + col) as f64,
        GridDirection::Column => {
            let rows = total.div_ceil(columns);
            (col * rows + row) as f64
        }
        GridDirection::Diagonal => (row + col) as f64,
    }
}
