use ark_infographic::{
    ArkColorTable, CreatureData, DefaultStrings, InfoGraphicConfig, Rasterizer, ServerSettings,
    SpeciesInfo,
};

#[test]
fn card_rasterizes_at_layout_size() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let creature = CreatureData {
        species_name: "Rex".to_string(),
        ..CreatureData::default()
    };
    let species = SpeciesInfo {
        used_stats: [true; 12],
        ..SpeciesInfo::default()
    };

    let png = Rasterizer::new(&[])
        .render_infographic_png(
            &creature,
            &species,
            &ServerSettings::default(),
            &InfoGraphicConfig::default(),
            &ArkColorTable::default(),
            &DefaultStrings,
            None,
        )
        .unwrap();

    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (358, 180));
    // border stroke covers the outermost pixel ring
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(img.get_pixel(357, 179).0, [0, 0, 0, 255]);
    // empty area right of the color column
    assert_eq!(img.get_pixel(340, 100).0, [255, 255, 255, 255]);
}

#[test]
fn background_color_fills_the_card() {
    let config = InfoGraphicConfig {
        back_color: ark_infographic::Rgba8::rgb(30, 40, 50),
        border_width: 0,
        ..InfoGraphicConfig::default()
    };
    let png = Rasterizer::new(&[])
        .render_infographic_png(
            &CreatureData::default(),
            &SpeciesInfo::default(),
            &ServerSettings::default(),
            &config,
            &ArkColorTable::default(),
            &DefaultStrings,
            None,
        )
        .unwrap();

    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (360, 180));
    assert_eq!(img.get_pixel(0, 0).0, [30, 40, 50, 255]);
    assert_eq!(img.get_pixel(300, 150).0, [30, 40, 50, 255]);
}
