// PROCRASTINATOR SELECTION RESULT
// SHARED BY BOTH SELECTORS: WINNER, ITS SCORE, AND THE FINAL RUN CAP IF ANY.
//
// score IS THE WINNER'S CAPPED MEAN ESTIMATE (LEAPSANDBOUNDS) OR THE
// ACHIEVED CONFIDENCE GAP (STRUCTURED PROCRASTINATION).

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    pub best_config: usize,
    pub score: f64,
    pub tau: Option<f64>,
}
