use roomview_kernel::SchedulerError;

/// Errors from mounting and driving a [`RoomView`](crate::RoomView).
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("view is not mounted")]
    NotMounted,
    #[error("view is already mounted")]
    AlreadyMounted,
    #[error("unusable container: {width}x{height}")]
    InvalidContainer { width: u32, height: u32 },
    #[error("rendering surface could not be attached: {0}")]
    Surface(String),
    #[error("tick rejected: {0}")]
    Scheduler(#[from] SchedulerError),
}
