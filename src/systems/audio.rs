//! Audio bridge systems and the headless audio thread.
//!
//! - [`forward_audio_cmds`] pushes [`AudioCmd`] messages written by systems
//!   (cue sounds from the animation resolver) into the channel.
//! - [`poll_audio_messages`] drains acknowledgements back into the ECS.
//! - [`audio_thread`] owns playback. Mixing is out of scope, so it only logs
//!   and acknowledges each one-shot.
//!
//! See also: [`crate::events::audio`] and [`crate::resources::audio`].

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info};

/// Drain pending acknowledgements from the audio thread into the ECS.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.drain_messages());
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS AudioCmd messages to the audio thread.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        if !bridge.send(cmd.clone()) {
            debug!("[audio] thread gone, dropping {:?}", cmd);
        }
    }
}

/// Advance the ECS message queue for AudioCmd.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Entry point of the audio thread. Blocks until [`AudioCmd::Shutdown`] or
/// until every sender is gone.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    info!("[audio] thread starting (id={:?})", std::thread::current().id());

    let mut played: u64 = 0;
    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::PlayFxAt { id, x, y } => {
                debug!("[audio] one-shot '{}' at ({:.1}, {:.1})", id, x, y);
                played += 1;
                let _ = tx_msg.send(AudioMessage::FxPlayed { id });
            }
            AudioCmd::Shutdown => break,
        }
    }

    info!("[audio] thread exiting after {} one-shots", played);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn thread_acknowledges_and_stops() {
        let (tx_cmd, rx_cmd) = unbounded();
        let (tx_msg, rx_msg) = unbounded();
        let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));

        tx_cmd
            .send(AudioCmd::PlayFxAt {
                id: "Hoof_Step".to_string(),
                x: 1.0,
                y: 2.0,
            })
            .unwrap();
        tx_cmd.send(AudioCmd::Shutdown).unwrap();
        handle.join().unwrap();

        let acks: Vec<AudioMessage> = rx_msg.try_iter().collect();
        assert_eq!(
            acks,
            vec![AudioMessage::FxPlayed {
                id: "Hoof_Step".to_string()
            }]
        );
    }
}
