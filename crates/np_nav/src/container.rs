use async_trait::async_trait;
use np_core::Result;
use np_render::Fragment;
use tokio::sync::Mutex;

/// The region of the page whose content is replaced on every transition.
#[async_trait]
pub trait ContentContainer: Send + Sync {
    async fn swap(&self, fragment: Fragment) -> Result<()>;
}

/// Keeps every fragment it was given, newest last.
#[derive(Debug, Default)]
pub struct MemoryContainer {
    swaps: Mutex<Vec<Fragment>>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// What the container currently shows.
    pub async fn current(&self) -> Option<Fragment> {
        self.swaps.lock().await.last().cloned()
    }

    pub async fn swaps(&self) -> Vec<Fragment> {
        self.swaps.lock().await.clone()
    }
}

#[async_trait]
impl ContentContainer for MemoryContainer {
    async fn swap(&self, fragment: Fragment) -> Result<()> {
        self.swaps.lock().await.push(fragment);
        Ok(())
    }
}
