use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use sauna::{MotionMode, ParameterId, SaunaProcessor, Vec3};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Initialize CPAL.
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .expect("no output device available");

    let frame_size: usize = 1024;
    let sample_rate: usize = 48000;
    let num_channels: usize = 2;

    let config = cpal::StreamConfig {
        buffer_size: cpal::BufferSize::Fixed(frame_size as u32),
        sample_rate: cpal::SampleRate(sample_rate as u32),
        channels: num_channels as u16,
    };

    let mut processor: SaunaProcessor = SaunaProcessor::default();
    processor.prepare(sample_rate as f64, frame_size).unwrap();

    // A slow orbit, tilted towards the listener's right.
    let parameters = processor.parameters();
    parameters.set_mode(MotionMode::Orbit);
    parameters.set(ParameterId::Speed, 1.5);
    parameters.set(ParameterId::OrbitRadius, 1.5);
    parameters.set(ParameterId::OrbitStretch, 1.5);
    parameters.set_orbit_axis(Vec3::new(0.3, 0.0, 1.0));

    // Parameters of the generated sine wave.
    let frequency = 440.0; // Frequency of the sine wave, in Hz.
    let amplitude = 0.5; // Amplitude of the sine wave.
    let mut phase: f32 = 0.0; // Phase of the sine wave.
    let phase_increment = 2.0 * std::f32::consts::PI * frequency / sample_rate as f32;

    let mut samples_played: u64 = 0;
    let mut left = vec![0.0; frame_size];
    let mut right = vec![0.0; frame_size];

    let stream = device
        .build_output_stream(
            &config,
            move |output: &mut [sauna::Sample], _: &cpal::OutputCallbackInfo| {
                // The host may ask for more than one frame at a time.
                for chunk in output.chunks_mut(frame_size * num_channels) {
                    let num_samples = chunk.len() / num_channels;
                    let (left, right) = (&mut left[..num_samples], &mut right[..num_samples]);

                    for sample in left.iter_mut() {
                        *sample = amplitude * phase.sin();
                        phase = (phase + phase_increment) % (2.0 * std::f32::consts::PI);
                    }

                    // Plays the dry signal on both ears if the block is bypassed.
                    right.copy_from_slice(left);

                    let time = samples_played as f64 / sample_rate as f64;
                    // Errors are already logged.
                    let _ = processor.process_block(&mut [&mut *left, &mut *right], 1, Some(time));
                    samples_played += num_samples as u64;

                    // CPAL requires an interleaved format (i.e., [L0, R0, L1, R1, ...]).
                    for (frame, (l, r)) in chunk
                        .chunks_mut(num_channels)
                        .zip(left.iter().zip(right.iter()))
                    {
                        frame[0] = *l;
                        frame[1] = *r;
                    }
                }
            },
            move |err| tracing::error!(%err, "an error occurred on the output audio stream"),
            None,
        )
        .unwrap();

    stream.play().unwrap();

    // Keep the main thread alive.
    std::thread::park();
}
