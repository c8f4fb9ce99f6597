//! Cue sound bridge between the ECS world and the audio thread.
//!
//! The resolver writes [`AudioCmd::PlayFxAt`] messages; the bridge carries
//! them over a channel to the thread started by [`setup_audio`]. Dropping the
//! bridge (or calling [`shutdown_audio`]) stops and joins the thread.

use std::thread::JoinHandle;

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::warn;

use crate::error::{AnimError, Result};
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;

const AUDIO_THREAD_NAME: &str = "cue-audio";

#[derive(Resource)]
pub struct AudioBridge {
    tx_cmd: Sender<AudioCmd>,
    rx_msg: Receiver<AudioMessage>,
    handle: Option<JoinHandle<()>>,
}

impl AudioBridge {
    /// Start the audio thread and connect both channels to it.
    pub fn spawn() -> Result<Self> {
        let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
        let (tx_msg, rx_msg) = unbounded::<AudioMessage>();
        let handle = std::thread::Builder::new()
            .name(AUDIO_THREAD_NAME.to_string())
            .spawn(move || audio_thread(rx_cmd, tx_msg))
            .map_err(AnimError::AudioThread)?;
        Ok(Self {
            tx_cmd,
            rx_msg,
            handle: Some(handle),
        })
    }

    /// Queue a command. Returns `false` once the thread is gone.
    pub fn send(&self, cmd: AudioCmd) -> bool {
        self.tx_cmd.send(cmd).is_ok()
    }

    /// Acknowledgements received since the last call.
    pub fn drain_messages(&self) -> impl Iterator<Item = AudioMessage> + '_ {
        self.rx_msg.try_iter()
    }

    /// Ask the thread to stop and wait for it. Idempotent.
    pub fn shutdown(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        let _ = self.tx_cmd.send(AudioCmd::Shutdown);
        if handle.join().is_err() {
            warn!("[audio] thread panicked before shutdown");
        }
    }
}

impl Drop for AudioBridge {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Start the audio thread and register the bridge and message queues.
pub fn setup_audio(world: &mut World) -> Result<()> {
    world.insert_resource(AudioBridge::spawn()?);
    world.init_resource::<Messages<AudioMessage>>();
    world.init_resource::<Messages<AudioCmd>>();
    Ok(())
}

/// Remove the bridge from the world and stop the thread.
pub fn shutdown_audio(world: &mut World) {
    if let Some(mut bridge) = world.remove_resource::<AudioBridge>() {
        bridge.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_is_acknowledged_before_shutdown_returns() {
        let mut bridge = AudioBridge::spawn().unwrap();
        assert!(bridge.send(AudioCmd::PlayFxAt {
            id: "Hoof_Step".to_string(),
            x: 0.0,
            y: 0.0,
        }));
        bridge.shutdown();

        let acks: Vec<AudioMessage> = bridge.drain_messages().collect();
        assert_eq!(
            acks,
            vec![AudioMessage::FxPlayed {
                id: "Hoof_Step".to_string()
            }]
        );
        assert!(!bridge.send(AudioCmd::Shutdown));
        bridge.shutdown();
    }

    #[test]
    fn setup_and_shutdown_through_world() {
        let mut world = World::new();
        setup_audio(&mut world).unwrap();
        assert!(world.contains_resource::<AudioBridge>());
        assert!(world.contains_resource::<Messages<AudioCmd>>());

        shutdown_audio(&mut world);
        assert!(!world.contains_resource::<AudioBridge>());
    }
}
