//! Audio output using cpal and a ring buffer

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::{
    traits::{Consumer, Producer, Split},
    HeapRb,
};
use tracing::{debug, error};

use super::AudioSink;
use crate::error::TrainerError;
use crate::tone::ToneBuffer;

/// Seconds of audio the ring buffer can hold.
/// The longest single tone (a dash at 5 WPM) is 0.72 s, so two seconds never overflows in practice.
const BUFFER_SECONDS: usize = 2;

fn unavailable(message: impl Into<String>) -> TrainerError {
    TrainerError::AudioOutputUnavailable(message.into())
}

/// The default output device.
///
/// Tones are pushed into a lock-free ring buffer that the device callback
/// drains; whatever is not filled by tones is silence. Mono samples are
/// copied to every channel the device has.
pub struct DeviceSink {
    /// Producer side of the ring buffer (playback thread writes here)
    producer: ringbuf::HeapProd<f32>,
    /// The cpal stream (kept alive for the duration)
    _stream: cpal::Stream,
    sample_rate: u32,
    channels: usize,
    /// Set by the stream's error callback
    failed: Arc<AtomicBool>,
}

impl DeviceSink {
    pub fn open() -> Result<Self, TrainerError> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or_else(|| unavailable("no audio output device available"))?;

        let supported = device
            .default_output_config()
            .map_err(|e| unavailable(format!("failed to get default output config: {}", e)))?;

        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels() as usize;
        let stream_config = supported.config();

        let ring = HeapRb::<f32>::new(sample_rate as usize * channels * BUFFER_SECONDS);
        let (producer, mut consumer) = ring.split();

        let failed = Arc::new(AtomicBool::new(false));
        let on_error = {
            let failed = Arc::clone(&failed);
            move |err: cpal::StreamError| {
                error!("Audio stream error: {}", err);
                failed.store(true, Ordering::Relaxed);
            }
        };

        let stream = match supported.sample_format() {
            cpal::SampleFormat::F32 => device.build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let popped = consumer.pop_slice(data);
                    data[popped..].fill(0.0);
                },
                on_error,
                None,
            ),
            cpal::SampleFormat::I16 => {
                let mut scratch: Vec<f32> = vec![0.0; 4096];
                device.build_output_stream(
                    &stream_config,
                    move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                        if scratch.len() < data.len() {
                            scratch.resize(data.len(), 0.0);
                        }
                        let popped = consumer.pop_slice(&mut scratch[..data.len()]);
                        for (out, &f) in data.iter_mut().zip(&scratch[..popped]) {
                            *out = (f * 32767.0).clamp(-32768.0, 32767.0) as i16;
                        }
                        data[popped..].fill(0);
                    },
                    on_error,
                    None,
                )
            }
            cpal::SampleFormat::U16 => {
                let mut scratch: Vec<f32> = vec![0.0; 4096];
                device.build_output_stream(
                    &stream_config,
                    move |data: &mut [u16], _: &cpal::OutputCallbackInfo| {
                        if scratch.len() < data.len() {
                            scratch.resize(data.len(), 0.0);
                        }
                        let popped = consumer.pop_slice(&mut scratch[..data.len()]);
                        for (out, &f) in data.iter_mut().zip(&scratch[..popped]) {
                            *out = (f * 32767.0 + 32768.0).clamp(0.0, 65535.0) as u16;
                        }
                        // 0x8000 is silence for unsigned samples
                        data[popped..].fill(32768);
                    },
                    on_error,
                    None,
                )
            }
            other => {
                return Err(unavailable(format!("unsupported sample format: {:?}", other)));
            }
        }
        .map_err(|e| unavailable(format!("failed to build audio stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| unavailable(format!("failed to play audio stream: {}", e)))?;

        debug!(sample_rate, channels, "audio stream started");

        Ok(Self {
            producer,
            _stream: stream,
            sample_rate,
            channels,
            failed,
        })
    }
}

impl AudioSink for DeviceSink {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn play(&mut self, buffer: ToneBuffer) -> Result<(), TrainerError> {
        if self.failed.load(Ordering::Relaxed) {
            return Err(unavailable("audio stream stopped"));
        }

        let channels = self.channels;
        let frames: Vec<f32> = buffer
            .samples()
            .iter()
            .flat_map(|&s| std::iter::repeat(s as f32 / 32768.0).take(channels))
            .collect();

        let pushed = self.producer.push_slice(&frames);
        if pushed < frames.len() {
            debug!(dropped = frames.len() - pushed, "audio buffer full, tone truncated");
        }
        Ok(())
    }
}
