//! # Plugin Lifecycle Tests
//!
//! Drives a [`PluginContext`] through the host message sequence of a real
//! session: data loaded, play, save, load another save, come back.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use equip_toggle::{
    ActorId, BipedSlot, HostMessage, MessageQueue, Perspective, PluginConfig, PluginContext, SlotState,
};
use equip_toggle_persistence::{CoSaveWriter, RecordWriter, AUTO_TOGGLE_RECORD};

const PLAYER: ActorId = ActorId(0x14);
const LYDIA: ActorId = ActorId(0x000A_2C94);

fn temp_saves(tag: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    std::env::temp_dir().join(format!("equip_toggle_it_{tag}_{nanos}"))
}

fn context_in(dir: &PathBuf) -> PluginContext {
    let mut config = PluginConfig::default();
    config.companion.directory = dir.clone();
    PluginContext::new(config)
}

#[test]
fn test_save_then_load_restores_toggles() {
    let dir = temp_saves("roundtrip");
    let ctx = context_in(&dir);
    let api = ctx.api();

    api.set_toggle_state(PLAYER, BipedSlot::Circlet, SlotState::Show, Perspective::FirstPerson);
    api.set_toggle_state(LYDIA, BipedSlot::Body, SlotState::Hide, Perspective::ThirdPerson);
    let before = ctx.store().snapshot();

    ctx.handle_message(&HostMessage::SaveGame("Save1".into())).unwrap();
    assert!(dir.join("Save1.etog").exists());

    api.set_toggle_state(PLAYER, BipedSlot::Feet, SlotState::Show, Perspective::FirstPerson);
    ctx.handle_message(&HostMessage::PreLoadGame("Save1.ess".into())).unwrap();

    assert_eq!(ctx.store().snapshot(), before);
    assert_eq!(
        api.get_toggle_state(PLAYER, BipedSlot::Ears, Perspective::FirstPerson),
        SlotState::Show
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_loading_other_save_does_not_leak_state() {
    let dir = temp_saves("isolation");
    let ctx = context_in(&dir);

    ctx.api()
        .set_toggle_state(PLAYER, BipedSlot::Hands, SlotState::Show, Perspective::ThirdPerson);
    ctx.handle_message(&HostMessage::SaveGame("WithToggles".into())).unwrap();

    ctx.handle_message(&HostMessage::PreLoadGame("Fresh.ess".into())).unwrap();
    assert!(ctx.store().is_empty());

    ctx.handle_message(&HostMessage::PreLoadGame("WithToggles.ess".into())).unwrap();
    assert_eq!(ctx.store().slot_count(), 1);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_resolver_remaps_and_drops_actors() {
    let dir = temp_saves("resolver");
    let writer_ctx = context_in(&dir);
    writer_ctx
        .api()
        .set_toggle_state(PLAYER, BipedSlot::Head, SlotState::Show, Perspective::FirstPerson);
    writer_ctx
        .api()
        .set_toggle_state(LYDIA, BipedSlot::Body, SlotState::Show, Perspective::ThirdPerson);
    writer_ctx
        .handle_message(&HostMessage::SaveGame("Modded".into()))
        .unwrap();

    // LYDIA's plugin was uninstalled; everything else moved load order.
    let ctx = context_in(&dir).with_resolver(|old: ActorId| {
        (old != LYDIA).then_some(ActorId(old.raw() | 0x0100_0000))
    });
    ctx.handle_message(&HostMessage::PreLoadGame("Modded.ess".into())).unwrap();

    let snapshot = ctx.store().snapshot();
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.contains_key(&ActorId(0x0100_0014)));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_outdated_record_ignored() {
    let dir = temp_saves("outdated");
    let ctx = context_in(&dir);

    let mut writer = CoSaveWriter::new();
    writer.open_record(AUTO_TOGGLE_RECORD, 0).unwrap();
    writer.write_record_data(&1u64).unwrap();
    ctx.companions().write("Old", &writer.finish().unwrap()).unwrap();

    ctx.api()
        .set_toggle_state(PLAYER, BipedSlot::Body, SlotState::Show, Perspective::FirstPerson);
    ctx.handle_message(&HostMessage::PreLoadGame("Old.ess".into())).unwrap();

    assert!(ctx.store().is_empty());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_corrupt_companion_reported() {
    let dir = temp_saves("corrupt");
    let ctx = context_in(&dir);
    ctx.companions().write("Broken", b"not a co-save").unwrap();

    ctx.api()
        .set_toggle_state(PLAYER, BipedSlot::Body, SlotState::Show, Perspective::FirstPerson);
    assert!(ctx
        .handle_message(&HostMessage::PreLoadGame("Broken.ess".into()))
        .is_err());
    assert!(ctx.store().is_empty());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_delete_and_prune_companions() {
    let dir = temp_saves("prune");
    let ctx = context_in(&dir);

    for save in ["Alive", "Deleted", "Orphan"] {
        ctx.handle_message(&HostMessage::SaveGame(save.into())).unwrap();
    }
    fs::write(dir.join("Alive.ess"), b"host save").unwrap();

    ctx.handle_message(&HostMessage::DeleteGame("Deleted".into())).unwrap();
    assert!(!dir.join("Deleted.etog").exists());

    ctx.handle_message(&HostMessage::DataLoaded).unwrap();
    assert!(ctx.is_ready());
    assert!(dir.join("Alive.etog").exists());
    assert!(!dir.join("Orphan.etog").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_messages_from_host_thread() {
    let dir = temp_saves("queue");
    let ctx = context_in(&dir);
    let (host, inbox) = MessageQueue::create_pair(8);

    ctx.api()
        .set_toggle_state(LYDIA, BipedSlot::Shield, SlotState::Show, Perspective::ThirdPerson);

    let sender = std::thread::spawn(move || {
        host.send_blocking(HostMessage::DataLoaded);
        host.send_blocking(HostMessage::SaveGame("Queued".into()));
        host.send_blocking(HostMessage::PreLoadGame("Queued.ess".into()));
    });
    sender.join().unwrap();

    assert_eq!(ctx.drain(&inbox), 3);
    assert_eq!(
        ctx.store()
            .toggle_state(LYDIA, BipedSlot::Shield, Perspective::ThirdPerson),
        Some(SlotState::Show)
    );

    let _ = fs::remove_dir_all(&dir);
}
