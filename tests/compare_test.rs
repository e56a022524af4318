//! 画像比較の統合テスト
//!
//! 画像は `image` でメモリ上に生成する。

use grbdiff::compare::{compare, find_differences, BoundingBox, ComparisonStatus, OUTLINE_COLOR};
use image::{Rgb, RgbImage};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const GREEN: Rgb<u8> = Rgb([0, 105, 11]);

/// 白地に配線風の横線を数本引いた画像
fn board_image(width: u32, height: u32) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, WHITE);
    for y in (8..height).step_by(16) {
        for x in 4..width - 4 {
            image.put_pixel(x, y, GREEN);
            image.put_pixel(x, y + 1, GREEN);
        }
    }
    image
}

/// `outer` が `inner` を完全に含むか
fn encloses(outer: &BoundingBox, inner: &BoundingBox) -> bool {
    inner.x >= outer.x
        && inner.y >= outer.y
        && inner.x + inner.width <= outer.x + outer.width
        && inner.y + inner.height <= outer.y + outer.height
}

fn fill_rect(image: &mut RgbImage, rect: BoundingBox, color: Rgb<u8>) {
    for y in rect.y..rect.y + rect.height {
        for x in rect.x..rect.x + rect.width {
            image.put_pixel(x, y, color);
        }
    }
}

#[test]
fn test_identical_images_are_equal() {
    let mut a = board_image(64, 64);
    let mut b = a.clone();
    let mut combined = a.clone();
    let original = a.clone();

    let result = compare(&mut a, &mut b, &mut combined);

    assert_eq!(result.status, ComparisonStatus::Ok { score: 1.0 });
    assert!(result.bounding_boxes.is_empty());
    assert_eq!(result.status.summary(), "OK. Images are 100.0% equal.");
    assert_eq!(a, original);
    assert_eq!(combined, original);
}

#[test]
fn test_single_region_change_gives_one_box() {
    let mut a = RgbImage::from_pixel(64, 64, WHITE);
    let mut b = a.clone();
    let mut combined = a.clone();
    let changed = BoundingBox { x: 28, y: 28, width: 8, height: 8 };
    fill_rect(&mut b, changed, Rgb([0, 0, 0]));

    let result = compare(&mut a, &mut b, &mut combined);

    let score = result.status.score().expect("comparison should succeed");
    assert!(score < 1.0);
    assert!(score > 0.0);

    assert_eq!(result.bounding_boxes.len(), 1);
    let found = result.bounding_boxes[0];
    assert!(encloses(&found, &changed), "{:?} should contain {:?}", found, changed);
    // 窓半径ぶんの広がりまでは許容
    let slack = BoundingBox { x: 20, y: 20, width: 24, height: 24 };
    assert!(encloses(&slack, &found), "{:?} is larger than expected", found);

    // 3枚すべての同じ位置に枠が描かれる
    let edge = (found.x, found.y + found.height / 2);
    for image in [&a, &b, &combined] {
        assert_eq!(*image.get_pixel(edge.0, edge.1), OUTLINE_COLOR);
    }
    // 枠から離れた画素は変わらない
    assert_eq!(*a.get_pixel(2, 2), WHITE);
}

#[test]
fn test_two_separate_changes_sorted_top_to_bottom() {
    let a = RgbImage::from_pixel(96, 96, WHITE);
    let mut b = a.clone();
    fill_rect(&mut b, BoundingBox { x: 60, y: 70, width: 6, height: 6 }, Rgb([0, 0, 0]));
    fill_rect(&mut b, BoundingBox { x: 10, y: 10, width: 6, height: 6 }, Rgb([0, 0, 0]));

    let (_, boxes) = find_differences(&a, &b).unwrap();

    assert_eq!(boxes.len(), 2);
    assert!(boxes[0].y < boxes[1].y);
    assert!(encloses(&boxes[0], &BoundingBox { x: 10, y: 10, width: 6, height: 6 }));
    assert!(encloses(&boxes[1], &BoundingBox { x: 60, y: 70, width: 6, height: 6 }));
}

#[test]
fn test_resolution_mismatch_leaves_images_untouched() {
    let mut a = board_image(64, 64);
    let mut b = board_image(64, 48);
    let mut combined = board_image(64, 64);
    let (a0, b0, c0) = (a.clone(), b.clone(), combined.clone());

    let result = compare(&mut a, &mut b, &mut combined);

    assert_eq!(result.status, ComparisonStatus::ResolutionMismatch);
    assert!(result.bounding_boxes.is_empty());
    assert_eq!((a, b, combined), (a0, b0, c0));
}

#[test]
fn test_image_smaller_than_window_fails() {
    let mut a = RgbImage::from_pixel(5, 5, WHITE);
    let mut b = RgbImage::from_pixel(5, 5, Rgb([0, 0, 0]));
    let mut combined = a.clone();
    let b0 = b.clone();

    let result = compare(&mut a, &mut b, &mut combined);

    match &result.status {
        ComparisonStatus::CompareFailed { message } => {
            assert!(message.contains("7x7"), "{}", message);
            assert!(result.status.summary().starts_with("Failed to compare images. Error: "));
        }
        other => panic!("unexpected status: {:?}", other),
    }
    assert_eq!(b, b0);
}
