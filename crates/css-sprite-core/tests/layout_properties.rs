use css_sprite_core::prelude::*;
use rand::{Rng, SeedableRng};

fn random_icons(rng: &mut rand::rngs::StdRng, count: usize, width: Option<u32>) -> Vec<ImageDescriptor> {
    (0..count)
        .map(|i| {
            let w = width.unwrap_or_else(|| rng.gen_range(1..=80));
            let h = rng.gen_range(1..=40);
            ImageDescriptor::new(format!("icon{i}"), "png", format!("icon{i}.png"), Some((w, h)))
        })
        .collect()
}

fn disjoint(layout: &Layout<'_>) -> bool {
    for i in 0..layout.tiles.len() {
        for j in (i + 1)..layout.tiles.len() {
            if layout.tiles[i].rect().overlaps(&layout.tiles[j].rect()) {
                return false;
            }
        }
    }
    true
}

#[test]
fn equal_width_icons_stay_inside_canvas() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let w = rng.gen_range(1..=32);
        let count = rng.gen_range(1..=60);
        let max_width = rng.gen_range(w..=200);
        let icons = random_icons(&mut rng, count, Some(w));
        let cons = LayoutConstraints {
            min_size: 1,
            max_size: 100,
            max_width,
        };
        let layout = pack_layout(&icons, cons);
        assert_eq!(layout.tiles.len(), icons.len());
        assert!(layout.width <= max_width);
        for tile in &layout.tiles {
            assert!(
                tile.rect().fits_within(layout.width, layout.height),
                "tile {:?} outside {}x{}",
                tile.rect(),
                layout.width,
                layout.height
            );
        }
        assert!(disjoint(&layout));
    }
}

#[test]
fn mixed_icons_never_overlap() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let count = rng.gen_range(1..=80);
        let max_width = rng.gen_range(1..=256);
        let icons = random_icons(&mut rng, count, None);
        let cons = LayoutConstraints {
            min_size: 1,
            max_size: 100,
            max_width,
        };
        let layout = pack_layout(&icons, cons);
        assert!(disjoint(&layout));
        for tile in &layout.tiles {
            let r = tile.rect();
            assert!(r.bottom() <= layout.height);
            // Only tiles that overhang the row bound may extend past the canvas.
            assert!(r.right() <= layout.width || r.right() > max_width);
        }
        assert_eq!(layout.height, layout.rows.iter().sum::<u32>());
    }
}

#[test]
fn one_tile_per_eligible_icon_in_order() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(1234);
    let icons = random_icons(&mut rng, 150, None);
    let cons = LayoutConstraints {
        min_size: 10,
        max_size: 50,
        max_width: 300,
    };
    let layout = pack_layout(&icons, cons);
    let expected: Vec<&str> = icons
        .iter()
        .filter(|i| cons.accepts(i.width(), i.height()))
        .map(ImageDescriptor::name)
        .collect();
    let placed: Vec<&str> = layout.tiles.iter().map(|t| t.image.name()).collect();
    assert_eq!(placed, expected);
    assert_eq!(layout.skipped, icons.len() - expected.len());
}

#[test]
fn layout_is_repeatable() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(99);
    let icons = random_icons(&mut rng, 120, None);
    let cons = LayoutConstraints {
        min_size: 1,
        max_size: 64,
        max_width: 512,
    };
    let first = pack_layout(&icons, cons);
    let second = pack_layout(&icons, cons);
    assert_eq!(first, second);
    let a: Vec<Rect> = first.tiles.iter().map(Tile::rect).collect();
    let b: Vec<Rect> = second.tiles.iter().map(Tile::rect).collect();
    assert_eq!(a, b);
}
