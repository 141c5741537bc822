use hydra_basecase::BasecaseTable;
use hydra_core::SegmentState;
use hydra_metrics::Metrics;
use hydra_transport::Transport;

/// Everything `recursive_burn` and `funnel_until` need threaded through an
/// arbitrarily deep recursion, bundled into a single argument instead of
/// four.
///
/// `basecase_table` is `Some` exactly on rank 0 (the only rank that ever
/// reaches case C), so its presence doubles as the `is_base_rank` flag.
pub struct BurnContext<'a, T: Transport> {
    pub state: &'a mut SegmentState,
    pub transport: &'a mut T,
    pub metrics: &'a mut Metrics,
    pub basecase_table: Option<&'a BasecaseTable>,
}

impl<'a, T: Transport> BurnContext<'a, T> {
    pub fn is_base_rank(&self) -> bool {
        self.basecase_table.is_some()
    }
}
