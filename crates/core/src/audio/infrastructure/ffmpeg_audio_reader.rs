use std::path::Path;

use ffmpeg_next::format::sample::Type as SampleType;
use ffmpeg_next::format::Sample;
use ffmpeg_next::software::resampling;
use ffmpeg_next::util::frame::audio::Audio;
use ffmpeg_next::{codec, decoder, media, ChannelLayout};

use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::domain::audio_segment::AudioSegment;

type ReadError = Box<dyn std::error::Error + Send + Sync>;

/// Decodes any ffmpeg-supported audio or video file to mono f32 PCM.
#[derive(Debug, Default, Clone, Copy)]
pub struct FfmpegAudioReader;

impl AudioReader for FfmpegAudioReader {
    fn read_audio(
        &self,
        path: &Path,
        target_sample_rate: u32,
    ) -> Result<Option<AudioSegment>, ReadError> {
        ffmpeg_next::init()?;

        let mut ictx = ffmpeg_next::format::input(path)?;

        let (stream_index, parameters) = match ictx.streams().best(media::Type::Audio) {
            Some(stream) => (stream.index(), stream.parameters()),
            None => return Ok(None),
        };

        let mut decoder = codec::context::Context::from_parameters(parameters)?
            .decoder()
            .audio()?;

        let mut resampler = resampling::Context::get(
            decoder.format(),
            decoder.channel_layout(),
            decoder.rate(),
            Sample::F32(SampleType::Planar),
            ChannelLayout::MONO,
            target_sample_rate,
        )?;

        let mut samples: Vec<f32> = Vec::new();

        for (stream, packet) in ictx.packets() {
            if stream.index() != stream_index {
                continue;
            }
            decoder.send_packet(&packet)?;
            drain_decoder(&mut decoder, &mut resampler, &mut samples)?;
        }

        decoder.send_eof()?;
        drain_decoder(&mut decoder, &mut resampler, &mut samples)?;

        // The resampler may still hold buffered samples after the last frame.
        let mut resampled = Audio::empty();
        if let Ok(Some(delay)) = resampler.flush(&mut resampled) {
            if delay.output > 0 {
                extract_f32_samples(&resampled, &mut samples);
            }
        }

        log::debug!(
            "Decoded {} samples at {target_sample_rate} Hz from {}",
            samples.len(),
            path.display()
        );

        Ok(Some(AudioSegment::new(samples, target_sample_rate)))
    }
}

fn drain_decoder(
    decoder: &mut decoder::Audio,
    resampler: &mut resampling::Context,
    out: &mut Vec<f32>,
) -> Result<(), ReadError> {
    let mut decoded = Audio::empty();
    let mut resampled = Audio::empty();
    while decoder.receive_frame(&mut decoded).is_ok() {
        resampler.run(&decoded, &mut resampled)?;
        extract_f32_samples(&resampled, out);
    }
    Ok(())
}

/// Extract f32 samples from a planar mono resampled frame.
fn extract_f32_samples(frame: &Audio, out: &mut Vec<f32>) {
    let num_samples = frame.samples();
    if num_samples == 0 {
        return;
    }
    let data = frame.data(0);
    // Plane 0 of a planar F32 mono frame holds exactly `num_samples` floats.
    let floats = unsafe { std::slice::from_raw_parts(data.as_ptr() as *const f32, num_samples) };
    out.extend_from_slice(floats);
}
