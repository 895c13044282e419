use image::Rgba;

use overlap_core::crop::{generate_crop, CropRect};
use overlap_core::error::OverlapError;
use overlap_core::geometry::{Point, Rect, Size};
use overlap_core::invert::{inverted_luma, invert_luminance, luma_709};
use overlap_core::results::CropVariant;
use overlap_core::slot::{ImageSlot, SlotId};

mod common;

#[test]
fn test_crop_copies_the_overlapping_pixels() {
    let mut store = common::square_store(100.0);
    store.set_image(SlotId::A, common::coordinate_image(100, 100)).unwrap();
    store.set_image(SlotId::B, common::coordinate_image(40, 40)).unwrap();
    store.set_position(SlotId::B, Point::new(50.0, 60.0));

    let rect = store.intersection().unwrap();
    assert_eq!(rect, Rect::new(50.0, 60.0, 90.0, 100.0));

    let a = generate_crop(store.slot(SlotId::A).unwrap(), &rect, false).unwrap();
    assert_eq!(a.rect, CropRect { x: 50, y: 60, width: 40, height: 40 });
    assert_eq!(a.image.dimensions(), (40, 40));
    assert_eq!(a.image.get_pixel(0, 0), &Rgba([50, 60, 0, 255]));
    assert_eq!(a.image.get_pixel(39, 39), &Rgba([89, 99, 0, 255]));

    let b = generate_crop(store.slot(SlotId::B).unwrap(), &rect, false).unwrap();
    assert_eq!(b.rect, CropRect { x: 0, y: 0, width: 40, height: 40 });
    assert_eq!(b.image.get_pixel(7, 3), &Rgba([7, 3, 0, 255]));
    assert_eq!(b.slot, SlotId::B);
    assert_eq!(b.variant, CropVariant::Plain);
}

#[test]
fn test_crop_maps_back_to_native_resolution() {
    let mut store = common::square_store(100.0);
    // 200x100 fits at 0.5 -> 100x50 at (0, 25)
    store.set_image(SlotId::A, common::coordinate_image(200, 100)).unwrap();
    // 60x60 reuses 0.5 -> 30x30 at (35, 35)
    store.set_image(SlotId::B, common::coordinate_image(60, 60)).unwrap();

    let rect = store.intersection().unwrap();
    assert_eq!(rect, Rect::new(35.0, 35.0, 65.0, 65.0));

    let a = generate_crop(store.slot(SlotId::A).unwrap(), &rect, false).unwrap();
    assert_eq!(a.rect, CropRect { x: 70, y: 20, width: 60, height: 60 });
    assert_eq!(a.image.get_pixel(0, 0), &Rgba([70, 20, 0, 255]));

    let b = generate_crop(store.slot(SlotId::B).unwrap(), &rect, false).unwrap();
    assert_eq!(b.rect, CropRect { x: 0, y: 0, width: 60, height: 60 });
    assert_eq!(a.image.dimensions(), b.image.dimensions());
}

#[test]
fn test_crop_size_rounds_to_nearest() {
    let natural = Size::new(100.0, 100.0);
    let display = Size::new(50.0, 50.0);
    // s = 2: 10.3 * 2 = 20.6 -> 21, 10.2 * 2 = 20.4 -> 20
    let rect = Rect::new(5.25, 0.0, 15.55, 10.2);
    let crop = CropRect::for_display_region(&rect, Point::ORIGIN, display, natural).unwrap();
    assert_eq!(crop.width, 21);
    assert_eq!(crop.height, 20);
    // 5.25 * 2 = 10.5 rounds half away from zero
    assert_eq!(crop.x, 11);
    assert_eq!(crop.y, 0);
}

#[test]
fn test_crop_origin_shifts_to_stay_inside_source() {
    let natural = Size::new(100.0, 100.0);
    let display = Size::new(50.0, 50.0);
    // width 10.25 * 2 = 20.5 -> 21; origin 39.75 * 2 = 79.5 -> 80, limited to 79
    let rect = Rect::new(39.75, 0.0, 50.0, 10.0);
    let crop = CropRect::for_display_region(&rect, Point::ORIGIN, display, natural).unwrap();
    assert_eq!(crop.width, 21);
    assert_eq!(crop.x, 79);
    assert!(crop.x + crop.width <= 100);
}

#[test]
fn test_crop_of_unloaded_slot_is_not_ready() {
    let slot = ImageSlot::new(SlotId::C);
    let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    match generate_crop(&slot, &rect, false) {
        Err(OverlapError::NotReady(id)) => assert_eq!(id, SlotId::C),
        other => panic!("expected NotReady, got {other:?}"),
    }
}

#[test]
fn test_inverted_crop_is_grey() {
    let mut store = common::square_store(10.0);
    store
        .set_image(SlotId::A, common::solid_image(10, 10, [255, 0, 0, 200]))
        .unwrap();
    store
        .set_image(SlotId::B, common::solid_image(10, 10, [255, 0, 0, 200]))
        .unwrap();
    let rect = store.intersection().unwrap();

    let crop = generate_crop(store.slot(SlotId::A).unwrap(), &rect, true).unwrap();
    assert_eq!(crop.variant, CropVariant::Inverted);
    // L = 0.2126 * 255 = 54.2 -> 255 - 54.2 = 200.8 -> 201
    assert_eq!(crop.image.get_pixel(3, 3), &Rgba([201, 201, 201, 200]));
}

#[test]
fn test_inversion_extremes_preserve_alpha() {
    let mut img = common::solid_image(2, 1, [0, 0, 0, 17]);
    img.put_pixel(1, 0, Rgba([255, 255, 255, 99]));
    invert_luminance(&mut img);
    assert_eq!(img.get_pixel(0, 0), &Rgba([255, 255, 255, 17]));
    assert_eq!(img.get_pixel(1, 0), &Rgba([0, 0, 0, 99]));
}

#[test]
fn test_luma_uses_bt709_weights() {
    assert!((luma_709(0, 255, 0) - 182.376).abs() < 1e-3);
    assert!((luma_709(0, 0, 255) - 18.411).abs() < 1e-3);
    assert_eq!(inverted_luma(0, 0, 0), 255);
    assert_eq!(inverted_luma(255, 255, 255), 0);
}

#[test]
fn test_large_inversion_matches_per_pixel_rule() {
    // Large enough to take the parallel path.
    let mut img = common::coordinate_image(300, 300);
    let original = img.clone();
    invert_luminance(&mut img);
    for (x, y) in [(0, 0), (17, 250), (299, 299), (128, 64)] {
        let src = original.get_pixel(x, y);
        let v = inverted_luma(src[0], src[1], src[2]);
        assert_eq!(img.get_pixel(x, y), &Rgba([v, v, v, 255]));
    }
}

#[test]
fn test_crop_png_encoding() {
    let mut store = common::square_store(20.0);
    store.set_image(SlotId::A, common::coordinate_image(20, 20)).unwrap();
    store.set_image(SlotId::B, common::coordinate_image(10, 10)).unwrap();
    let rect = store.intersection().unwrap();
    let crop = generate_crop(store.slot(SlotId::B).unwrap(), &rect, false).unwrap();

    let bytes = crop.encode_png().unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded, crop.image);
    assert_eq!(crop.file_name(), "crop_b.png");
    assert_eq!(crop.label(), "Image B");
}
