use crate::error::{Error, Result};

use super::{GraphicsApi, RenderDevice, SwapChainConfig};

/// Observable device lifecycle.
///
/// Loss is deliberately absent: it is detected from each present result and
/// acted on in the same frame, never stored.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeviceState {
    Uninitialized,
    Ready,
}

/// Owns the factory, the device and the swap-chain configuration.
///
/// Invariant: `factory` and `device` are both `Some` or both `None`.
pub struct DeviceManager<G: GraphicsApi> {
    api: G,
    config: SwapChainConfig,

    // Field order is drop order: the device goes before its factory.
    device: Option<G::Device>,
    factory: Option<G::Factory>,
}

impl<G: GraphicsApi> DeviceManager<G> {
    pub fn new(api: G) -> Self {
        Self::with_config(api, SwapChainConfig::default())
    }

    pub fn with_config(api: G, config: SwapChainConfig) -> Self {
        Self {
            api,
            config,
            device: None,
            factory: None,
        }
    }

    pub fn state(&self) -> DeviceState {
        match (&self.factory, &self.device) {
            (Some(_), Some(_)) => DeviceState::Ready,
            _ => DeviceState::Uninitialized,
        }
    }

    pub fn config(&self) -> &SwapChainConfig {
        &self.config
    }

    pub fn api(&self) -> &G {
        &self.api
    }

    pub fn factory(&self) -> Option<&G::Factory> {
        self.factory.as_ref()
    }

    pub fn device(&self) -> Option<&G::Device> {
        self.device.as_ref()
    }

    pub fn device_mut(&mut self) -> Option<&mut G::Device> {
        self.device.as_mut()
    }

    /// Creates the factory and a device bound to `target`.
    ///
    /// No-op when already ready. On failure nothing is retained.
    pub fn create_device(&mut self, target: &G::Target) -> Result<()> {
        if self.state() == DeviceState::Ready {
            log::debug!("create_device on a ready device; ignored");
            return Ok(());
        }

        let factory = self.api.create_factory().ok_or(Error::DeviceFactory)?;

        let device = self
            .api
            .create_device(&factory, target, &self.config)
            .map_err(|e| Error::DeviceCreation {
                reason: format!("{e:#}"),
            })?;

        log::info!("graphics device created ({:?})", self.config);

        self.factory = Some(factory);
        self.device = Some(device);
        Ok(())
    }

    /// Releases the device, then the factory. Idempotent.
    pub fn destroy_device(&mut self) {
        let had_device = self.device.take().is_some();
        let had_factory = self.factory.take().is_some();
        if had_device || had_factory {
            log::info!("graphics device destroyed");
        }
    }

    /// Re-applies the swap-chain configuration to the existing device.
    ///
    /// Only used to recover from device loss; failures are logged and the next
    /// frame decides again.
    pub fn reset_device(&mut self) {
        let Some(device) = self.device.as_mut() else {
            return;
        };

        match device.reset(&self.config) {
            Ok(()) => log::debug!("graphics device reset"),
            Err(e) => log::warn!("graphics device reset failed: {e:#}"),
        }
    }
}

impl<G: GraphicsApi> Drop for DeviceManager<G> {
    fn drop(&mut self) {
        self.destroy_device();
    }
}
