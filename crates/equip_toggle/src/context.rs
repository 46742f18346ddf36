//! # Plugin Context
//!
//! Owns the store and everything bound to it, and reacts to host messages:
//!
//! | Message | Action |
//! |---|---|
//! | `DataLoaded` | mark ready, prune orphaned companion files |
//! | `SaveGame` | save callback, write companion file |
//! | `PreLoadGame` | revert, read companion file, load callback |
//! | `DeleteGame` | delete companion file |

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use equip_toggle_core::{AutoToggleMap, ToggleApi};
use equip_toggle_persistence::{
    ActorIdResolver, CoSaveReader, CoSaveWriter, IdentityResolver, SerializationCallbacks,
};
use tracing::{debug, error, info};

use crate::companion::{save_stem, CompanionFiles};
use crate::config::PluginConfig;
use crate::error::PluginResult;
use crate::messaging::{HostMessage, MessageReceiver};

/// Everything the plugin keeps alive between host messages.
pub struct PluginContext {
    config: PluginConfig,
    api: ToggleApi,
    callbacks: SerializationCallbacks,
    companions: CompanionFiles,
    resolver: Box<dyn ActorIdResolver + Send + Sync>,
    ready: AtomicBool,
}

impl PluginContext {
    /// Creates a context with an empty store and the identity resolver.
    #[must_use]
    pub fn new(config: PluginConfig) -> Self {
        let store = Arc::new(AutoToggleMap::new());
        let api = ToggleApi::new(Arc::clone(&store)).with_default_state(config.toggle.default_state);
        let callbacks = SerializationCallbacks::new(store);
        let companions = CompanionFiles::from_config(&config.companion);

        info!("loaded");

        Self {
            config,
            api,
            callbacks,
            companions,
            resolver: Box::new(IdentityResolver),
            ready: AtomicBool::new(false),
        }
    }

    /// Replaces the resolver used when loading saves.
    #[must_use]
    pub fn with_resolver<V>(mut self, resolver: V) -> Self
    where
        V: ActorIdResolver + Send + Sync + 'static,
    {
        self.resolver = Box::new(resolver);
        self
    }

    /// The public toggle API.
    #[must_use]
    pub fn api(&self) -> &ToggleApi {
        &self.api
    }

    /// The toggle store.
    #[must_use]
    pub fn store(&self) -> &Arc<AutoToggleMap> {
        self.callbacks.store()
    }

    /// The save/load/revert callbacks.
    #[must_use]
    pub fn callbacks(&self) -> &SerializationCallbacks {
        &self.callbacks
    }

    /// The companion file locator.
    #[must_use]
    pub fn companions(&self) -> &CompanionFiles {
        &self.companions
    }

    /// The configuration this context was built from.
    #[must_use]
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Whether `DataLoaded` has been handled.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Handles one host message.
    ///
    /// Failures are logged before being returned; the host never sees them.
    ///
    /// # Errors
    ///
    /// Returns the companion file or container error that stopped the
    /// message. The store is left as the callbacks left it.
    pub fn handle_message(&self, message: &HostMessage) -> PluginResult<()> {
        let result = match message {
            HostMessage::DataLoaded => self.on_data_loaded(),
            HostMessage::SaveGame(save) => self.on_save(save),
            HostMessage::PreLoadGame(save) => self.on_pre_load(save),
            HostMessage::DeleteGame(save) => self.on_delete(save),
        };
        if let Err(err) = &result {
            error!(critical = true, "Failed to handle {message:?}: {err}");
        }
        result
    }

    /// Handles every pending message in arrival order.
    ///
    /// Returns how many were handled without error.
    pub fn drain(&self, receiver: &MessageReceiver) -> usize {
        receiver
            .drain()
            .iter()
            .filter(|message| self.handle_message(message).is_ok())
            .count()
    }

    fn on_data_loaded(&self) -> PluginResult<()> {
        self.ready.store(true, Ordering::Release);
        debug!("Toggle API ready");
        self.companions.clear_unreferenced()?;
        Ok(())
    }

    fn on_save(&self, save: &str) -> PluginResult<()> {
        let mut writer = CoSaveWriter::new();
        if self.callbacks.save(&mut writer).is_err() {
            debug!("Writing partial toggle record for {}", save_stem(save));
        }
        let path = self.companions.write(save, &writer.finish()?)?;
        debug!("Saved toggles for {} to {}", save_stem(save), path.display());
        Ok(())
    }

    fn on_pre_load(&self, save: &str) -> PluginResult<()> {
        let save = save_stem(save);
        self.callbacks.revert();

        let Some(bytes) = self.companions.read(save)? else {
            debug!("No companion file for {save}");
            return Ok(());
        };

        let mut reader = CoSaveReader::from_bytes(bytes)?;
        let summary = self.callbacks.load(&mut reader, self.resolver.as_ref());
        debug!(
            "Loaded {save}: {} records loaded, {} skipped, {} failed",
            summary.loaded, summary.skipped, summary.failed
        );
        Ok(())
    }

    fn on_delete(&self, save: &str) -> PluginResult<()> {
        if self.companions.delete(save)? {
            debug!("Deleted companion file for {}", save_stem(save));
        }
        Ok(())
    }
}

impl std::fmt::Debug for PluginContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginContext")
            .field("config", &self.config)
            .field("api", &self.api)
            .field("companions", &self.companions)
            .field("ready", &self.is_ready())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equip_toggle_core::{ActorId, BipedSlot, Perspective, SlotState};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn context(tag: &str) -> (PluginContext, PathBuf) {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let dir = std::env::temp_dir().join(format!("equip_toggle_ctx_{tag}_{nanos}"));
        let mut config = PluginConfig::default();
        config.companion.directory = dir.clone();
        (PluginContext::new(config), dir)
    }

    #[test]
    fn test_ready_after_data_loaded() {
        let (ctx, dir) = context("ready");
        assert!(!ctx.is_ready());
        ctx.handle_message(&HostMessage::DataLoaded).unwrap();
        assert!(ctx.is_ready());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_pre_load_without_file_reverts() {
        let (ctx, dir) = context("revert");
        ctx.api()
            .set_toggle_state(ActorId(0x14), BipedSlot::Body, SlotState::Show, Perspective::FirstPerson);

        ctx.handle_message(&HostMessage::PreLoadGame("Missing.ess".into())).unwrap();
        assert!(ctx.store().is_empty());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_save_writes_companion_file() {
        let (ctx, dir) = context("save");
        ctx.api()
            .set_toggle_state(ActorId(0x14), BipedSlot::Ring, SlotState::Show, Perspective::ThirdPerson);

        ctx.handle_message(&HostMessage::SaveGame("Save7".into())).unwrap();

        let bytes = ctx.companions().read("Save7.ess").unwrap().unwrap();
        let mut reader = CoSaveReader::from_bytes(bytes).unwrap();
        ctx.callbacks().revert();
        let summary = ctx.callbacks().load(&mut reader, &IdentityResolver);

        assert_eq!(summary.loaded, 1);
        assert_eq!(ctx.store().slot_count(), 1);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_default_state_from_config() {
        let mut config = PluginConfig::default();
        config.toggle.default_state = SlotState::Show;
        let ctx = PluginContext::new(config);

        assert_eq!(
            ctx.api().get_toggle_state(ActorId(1), BipedSlot::Hands, Perspective::ThirdPerson),
            SlotState::Show
        );
    }
}
