use std::collections::HashMap;

use css_sprite_core::compositing::blit_rgba;
use css_sprite_core::prelude::*;
use image::{Rgba, RgbaImage, imageops};

fn solid(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba(px))
}

fn gradient(w: u32, h: u32, seed: u8) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        Rgba([seed, (x * 30) as u8, (y * 40) as u8, 200 + (x + y) as u8])
    })
}

#[test]
fn composed_sprite_holds_each_icon_at_its_tile() {
    let pixels: HashMap<&str, RgbaImage> = [
        ("a", gradient(4, 3, 10)),
        ("b", gradient(5, 6, 90)),
        ("c", solid(2, 2, [255, 0, 0, 128])),
    ]
    .into_iter()
    .collect();
    let icons: Vec<ImageDescriptor> = ["a", "b", "c"]
        .iter()
        .map(|n| ImageDescriptor::new(*n, "png", format!("{n}.png"), Some(pixels[n].dimensions())))
        .collect();
    let layout = pack_layout(
        &icons,
        LayoutConstraints {
            min_size: 1,
            max_size: 16,
            max_width: 9,
        },
    );
    assert_eq!((layout.width, layout.height), (9, 8));

    let canvas = compose_with(&layout, |image| Ok(pixels[image.name()].clone())).expect("compose");
    let png = encode_png(&canvas, 6).expect("encode");
    let decoded = image::load_from_memory(&png).expect("decode").to_rgba8();
    assert_eq!(decoded.dimensions(), (9, 8));

    for tile in &layout.tiles {
        let region = imageops::crop_imm(&decoded, tile.x, tile.y, tile.width(), tile.height()).to_image();
        assert_eq!(&region, &pixels[tile.image.name()], "tile {}", tile.image.name());
    }
    // Gap below "a" inside the first row stays transparent.
    assert_eq!(decoded.get_pixel(0, 4), &Rgba([0, 0, 0, 0]));
    assert_eq!(decoded.get_pixel(8, 7), &Rgba([0, 0, 0, 0]));
}

#[test]
fn decode_errors_abort_composition() {
    let icons = vec![ImageDescriptor::new("a", "png", "a.png", Some((2, 2)))];
    let layout = pack_layout(
        &icons,
        LayoutConstraints {
            min_size: 1,
            max_size: 16,
            max_width: 16,
        },
    );
    let err = compose_with(&layout, |image| {
        Err(SpriteError::UnsupportedExtension(image.extension().to_string()))
    })
    .unwrap_err();
    assert!(matches!(err, SpriteError::UnsupportedExtension(_)));
}

#[test]
fn blit_clips_at_canvas_edges() {
    let mut canvas = RgbaImage::new(4, 4);
    let src = solid(3, 3, [1, 2, 3, 255]);
    blit_rgba(&src, &mut canvas, 2, 2);
    let painted = canvas.pixels().filter(|p| p.0[3] == 255).count();
    assert_eq!(painted, 4);
    assert_eq!(canvas.get_pixel(3, 3), &Rgba([1, 2, 3, 255]));
    assert_eq!(canvas.get_pixel(1, 1), &Rgba([0, 0, 0, 0]));

    // Entirely outside: nothing happens.
    blit_rgba(&src, &mut canvas, 10, 0);
    assert_eq!(canvas.pixels().filter(|p| p.0[3] == 255).count(), 4);
}

#[test]
fn blit_replaces_instead_of_blending() {
    let mut canvas = solid(2, 2, [255, 255, 255, 255]);
    blit_rgba(&solid(1, 1, [0, 0, 0, 0]), &mut canvas, 0, 0);
    assert_eq!(canvas.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    assert_eq!(canvas.get_pixel(1, 1), &Rgba([255, 255, 255, 255]));
}

#[test]
fn empty_canvas_is_not_encoded() {
    let err = encode_png(&RgbaImage::new(0, 0), 9).unwrap_err();
    assert!(matches!(err, SpriteError::Encode(_)));
}
