//! 外側輪郭の外接矩形
//!
//! 前景は8近傍、背景は4近傍で連結とみなす。画像の外周に4近傍で繋がる背景を
//! 「外側背景」とし、外側背景に接する（または画像端に接する）前景領域だけを
//! 外側輪郭として扱う。他の領域の穴の中にある領域は報告しない。

use super::BoundingBox;
use image::GrayImage;
use std::collections::VecDeque;

const NEIGHBORS_4: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const NEIGHBORS_8: [(isize, isize); 8] = [
    (1, 0), (-1, 0), (0, 1), (0, -1),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];

struct Grid {
    w: usize,
    h: usize,
}

impl Grid {
    fn step(&self, i: usize, (dx, dy): (isize, isize)) -> Option<usize> {
        let x = (i % self.w) as isize + dx;
        let y = (i / self.w) as isize + dy;
        if x < 0 || y < 0 || x >= self.w as isize || y >= self.h as isize {
            None
        } else {
            Some(y as usize * self.w + x as usize)
        }
    }

    fn on_edge(&self, i: usize) -> bool {
        let (x, y) = (i % self.w, i / self.w);
        x == 0 || y == 0 || x + 1 == self.w || y + 1 == self.h
    }
}

/// マスク（0以外が前景）の外側領域ごとの外接矩形を (y, x) 順で返す
pub fn external_bounding_boxes(mask: &GrayImage) -> Vec<BoundingBox> {
    let grid = Grid {
        w: mask.width() as usize,
        h: mask.height() as usize,
    };
    let foreground: Vec<bool> = mask.as_raw().iter().map(|&v| v > 0).collect();
    let n = foreground.len();

    // 外側背景
    let mut outer = vec![false; n];
    let mut queue = VecDeque::new();
    for i in (0..n).filter(|&i| grid.on_edge(i) && !foreground[i]) {
        outer[i] = true;
        queue.push_back(i);
    }
    while let Some(i) = queue.pop_front() {
        for offset in NEIGHBORS_4 {
            if let Some(j) = grid.step(i, offset) {
                if !foreground[j] && !outer[j] {
                    outer[j] = true;
                    queue.push_back(j);
                }
            }
        }
    }

    let mut visited = vec![false; n];
    let mut boxes = Vec::new();

    for start in 0..n {
        if !foreground[start] || visited[start] {
            continue;
        }

        let (mut min_x, mut min_y) = (usize::MAX, usize::MAX);
        let (mut max_x, mut max_y) = (0usize, 0usize);
        let mut external = false;

        visited[start] = true;
        queue.push_back(start);
        while let Some(i) = queue.pop_front() {
            let (x, y) = (i % grid.w, i / grid.w);
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);

            if !external {
                external = grid.on_edge(i)
                    || NEIGHBORS_4
                        .iter()
                        .filter_map(|&o| grid.step(i, o))
                        .any(|j| outer[j]);
            }

            for offset in NEIGHBORS_8 {
                if let Some(j) = grid.step(i, offset) {
                    if foreground[j] && !visited[j] {
                        visited[j] = true;
                        queue.push_back(j);
                    }
                }
            }
        }

        if external {
            boxes.push(BoundingBox {
                x: min_x as u32,
                y: min_y as u32,
                width: (max_x - min_x + 1) as u32,
                height: (max_y - min_y + 1) as u32,
            });
        }
    }

    boxes.sort_by_key(|b| (b.y, b.x, b.width, b.height));
    boxes
}
