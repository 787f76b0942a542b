use scrom::{Config, ControlRom, RomError, SynthModel};

mod common;
use common::ImageBuilder;

fn truncated_sc55() -> Vec<u8> {
    ImageBuilder::new(SynthModel::Sc55)
        .instrument(0, "Piano 1", [0, 0xFFFF])
        .partial(0, "Piano A", &[(127, 1)])
        .sample(0, 0x000040, 8, 0, 2, 60)
        .truncate(0x30000)
        .build()
}

#[test]
fn tables_inside_a_short_image_still_decode() {
    let config = Config::default();
    let rom = ControlRom::from_image(&config, truncated_sc55()).unwrap();

    let mut instruments = Vec::new();
    let mut partials = Vec::new();
    let mut samples = Vec::new();
    assert_eq!(rom.get_instruments(&mut instruments).unwrap(), 1);
    assert_eq!(rom.get_partials(&mut partials).unwrap(), 1);
    assert_eq!(rom.get_samples(&mut samples).unwrap(), 1);
}

#[test]
fn tables_past_the_end_are_rejected() {
    let config = Config::default();
    let rom = ControlRom::from_image(&config, truncated_sc55()).unwrap();

    let mut variations = Vec::new();
    assert!(matches!(
        rom.get_variations(&mut variations),
        Err(RomError::TruncatedImage { start: 0x30000, len: 0x30000, .. })
    ));
    assert!(variations.is_empty());

    let mut drums = Vec::new();
    assert!(matches!(
        rom.get_drum_sets(&mut drums),
        Err(RomError::TruncatedImage { start: 0x38080, .. })
    ));
    assert!(drums.is_empty());
}

#[test]
fn demo_directory_past_the_end_is_rejected() {
    let config = Config::default();
    let rom = ControlRom::from_image(&config, truncated_sc55()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        rom.dump_demo_songs(dir.path()),
        Err(RomError::TruncatedImage { .. })
    ));
}

#[test]
fn waveform_past_the_end_fails_the_whole_table() {
    let image = ImageBuilder::new(SynthModel::Vsc)
        .sample(0, 0x3F000, 4, 0, 2, 60)
        .sample(1, 0x3FFFE, 4, 0, 2, 60)
        .build();
    let config = Config::default();
    let rom = ControlRom::from_image(&config, image).unwrap();

    let mut samples = Vec::new();
    assert!(matches!(
        rom.get_samples(&mut samples),
        Err(RomError::TruncatedImage { len: common::IMAGE_SIZE, .. })
    ));
    assert!(samples.is_empty());
}

#[test]
fn corrupt_sample_record_is_reported_with_its_index() {
    let image = ImageBuilder::new(SynthModel::Sc55)
        .sample(0, 0x000040, 8, 0, 2, 60)
        .sample(2, 0x000100, 8, 16, 0, 60)
        .build();
    let config = Config::default();
    let rom = ControlRom::from_image(&config, image).unwrap();

    let mut samples = Vec::new();
    assert!(matches!(
        rom.get_samples(&mut samples),
        Err(RomError::CorruptRecord { index: 2, .. })
    ));
    assert!(samples.is_empty());
}

#[test]
fn short_image_is_unrecognized() {
    let image = ImageBuilder::new(SynthModel::Sc55).truncate(0x8000).build();
    let config = Config::default();
    assert!(matches!(
        ControlRom::from_image(&config, image),
        Err(RomError::UnrecognizedModel { len: 0x8000 })
    ));
}
