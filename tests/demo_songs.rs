use scrom::{Config, ControlRom, RomError, SynthModel};

mod common;
use common::ImageBuilder;

const SONG_1: &[u8] = b"MThd\x00\x00\x00\x06\x00\x01";
const SONG_2: &[u8] = b"MThd\x00\x00\x00\x06\x00\x00\x00\x01";

#[test]
fn songs_are_written_one_file_each() {
    let image = ImageBuilder::new(SynthModel::Sc55mkII)
        .demo_song(0, 0x3D000, SONG_1)
        .demo_song(2, 0x3E000, SONG_2)
        .build();
    let config = Config::default();
    let rom = ControlRom::from_image(&config, image).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let exports = rom.dump_demo_songs(dir.path()).unwrap();
    assert_eq!(exports.len(), 2);
    assert_eq!(exports[0].song.number, 1);
    assert_eq!(exports[1].song.number, 3);
    assert!(exports.iter().all(|e| e.result.is_ok()));

    assert_eq!(
        std::fs::read(dir.path().join("demo_song_1.bin")).unwrap(),
        SONG_1
    );
    assert_eq!(
        std::fs::read(dir.path().join("demo_song_3.bin")).unwrap(),
        SONG_2
    );
}

#[test]
fn failed_song_does_not_stop_the_others() {
    let image = ImageBuilder::new(SynthModel::Sc55)
        .demo_song(0, 0x3D000, SONG_1)
        .demo_song(1, 0x3E000, SONG_2)
        .build();
    let config = Config::default();
    let rom = ControlRom::from_image(&config, image).unwrap();

    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("demo_song_2.bin")).unwrap();

    let exports = rom.dump_demo_songs(dir.path()).unwrap();
    assert_eq!(exports.len(), 2);
    assert_eq!(*exports[0].result.as_ref().unwrap(), SONG_1.len());
    assert!(matches!(
        exports[1].result,
        Err(RomError::DemoExport { .. })
    ));
    assert_eq!(
        std::fs::read(dir.path().join("demo_song_1.bin")).unwrap(),
        SONG_1
    );
}

#[test]
fn output_directory_is_created() {
    let image = ImageBuilder::new(SynthModel::Sc88)
        .demo_song(0, 0x3D000, SONG_1)
        .build();
    let config = Config::default();
    let rom = ControlRom::from_image(&config, image).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("songs");
    let exports = rom.dump_demo_songs(&out).unwrap();
    assert_eq!(exports.len(), 1);
    assert!(out.join("demo_song_1.bin").is_file());
}

#[test]
fn vsc_has_no_demo_songs() {
    let image = ImageBuilder::new(SynthModel::Vsc).build();
    let config = Config::default();
    let rom = ControlRom::from_image(&config, image).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("songs");
    assert!(rom.dump_demo_songs(&out).unwrap().is_empty());
    assert!(!out.exists());
}
