use engine::graphics::{Color, Renderer2d, text_size};
use engine::ui::{Anchor, Rect, Size};

use crate::twenty48_core::{BOARD_SIZE, Board};

pub const TILE_SIZE: u32 = 150;
pub const TILE_MARGIN: u32 = 10;
pub const HEADER_HEIGHT: u32 = 70;
const GRID_SPAN: u32 = BOARD_SIZE as u32 * (TILE_SIZE + TILE_MARGIN) + TILE_MARGIN;
/// Window size at which the board is drawn 1:1.
pub const BASE_WIDTH: u32 = GRID_SPAN;
pub const BASE_HEIGHT: u32 = HEADER_HEIGHT + GRID_SPAN;

const COLOR_BACKGROUND: Color = [50, 50, 50, 255];
const COLOR_GAME_OVER_BG: Color = [30, 30, 30, 255];
const COLOR_TEXT: Color = [255, 255, 255, 255];
const COLOR_TILE_TEXT: Color = [0, 0, 0, 255];
const COLOR_GAME_OVER_TITLE: Color = [255, 0, 0, 255];

pub const GAME_OVER_TITLE: &str = "GAME OVER!";
pub const GAME_OVER_HINT: &str = "PRESS R TO RESTART OR Q TO QUIT";

/// Whatever shows the game to the player.
pub trait Frontend {
    fn draw(&mut self, board: &Board, score: u32, best: u32);
    fn draw_game_over(&mut self, score: u32, best: u32);
}

pub fn tile_color(value: u32) -> Color {
    match value {
        0 => [205, 193, 180, 255],
        2 => [238, 228, 218, 255],
        4 => [237, 224, 200, 255],
        8 => [255, 140, 0, 255],
        16 => [255, 120, 80, 255],
        32 => [255, 100, 60, 255],
        64 => [255, 80, 40, 255],
        128 => [255, 255, 100, 255],
        256 => [255, 255, 80, 255],
        512 => [255, 255, 60, 255],
        1024 => [255, 255, 40, 255],
        2048 => [255, 255, 20, 255],
        _ => [255, 255, 255, 255],
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardLayout {
    pub header: Rect,
    pub grid: Rect,
    pub tile: u32,
    pub margin: u32,
    pub text_scale: u32,
}

impl BoardLayout {
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let pitch = self.tile + self.margin;
        Rect::new(
            self.grid.x + self.margin + col as u32 * pitch,
            self.grid.y + self.margin + row as u32 * pitch,
            self.tile,
            self.tile,
        )
    }
}

fn scaled(value: u32, per_mille: u64) -> u32 {
    (value as u64 * per_mille / 1000) as u32
}

/// Centres the header and grid in a `width` x `height` surface, shrinking (never growing)
/// everything proportionally when the surface is smaller than the base size.
pub fn compute_layout(width: u32, height: u32) -> BoardLayout {
    let per_mille = (width as u64 * 1000 / BASE_WIDTH as u64)
        .min(height as u64 * 1000 / BASE_HEIGHT as u64)
        .min(1000);

    let tile = scaled(TILE_SIZE, per_mille);
    let margin = scaled(TILE_MARGIN, per_mille).max(1);
    let header_h = scaled(HEADER_HEIGHT, per_mille);
    let span = BOARD_SIZE as u32 * (tile + margin) + margin;

    let content = Rect::from_size(width, height).place(Size::new(span, header_h + span), Anchor::Center);

    BoardLayout {
        header: Rect::new(content.x, content.y, content.w, header_h),
        grid: Rect::new(content.x, content.y + header_h, span, span),
        tile,
        margin,
        text_scale: (header_h / 16).max(1),
    }
}

/// Largest scale up to `preferred` at which `text` fits in `max_w` pixels.
fn fit_scale(text: &str, preferred: u32, max_w: u32) -> u32 {
    let mut scale = preferred.max(1);
    while scale > 1 && text_size(text, scale).w > max_w {
        scale -= 1;
    }
    scale
}

fn tile_text_scale(label: &str, tile: u32) -> u32 {
    let unit = text_size(label, 1);
    let by_w = (tile * 7 / 10) / unit.w.max(1);
    let by_h = (tile * 4 / 10) / unit.h.max(1);
    by_w.min(by_h).max(1)
}

fn draw_centered(gfx: &mut dyn Renderer2d, area: Rect, text: &str, color: Color, scale: u32) {
    let at = area.place(text_size(text, scale), Anchor::Center);
    gfx.draw_text_scaled(at.x, at.y, text, color, scale);
}

pub fn draw_board(
    gfx: &mut dyn Renderer2d,
    width: u32,
    height: u32,
    board: &Board,
    score: u32,
    best: u32,
) {
    let layout = compute_layout(width, height);
    gfx.clear(COLOR_BACKGROUND);

    let pad = layout.margin;
    let score_text = format!("SCORE {score}");
    let best_text = format!("BEST {best}");
    let half = layout.header.w / 2;
    let score_scale = fit_scale(&score_text, layout.text_scale, half.saturating_sub(pad));
    let best_scale = fit_scale(&best_text, layout.text_scale, half.saturating_sub(pad));

    let score_size = text_size(&score_text, score_scale);
    let score_y = layout.header.y + layout.header.h.saturating_sub(score_size.h) / 2;
    gfx.draw_text_scaled(layout.header.x + pad, score_y, &score_text, COLOR_TEXT, score_scale);

    let best_size = text_size(&best_text, best_scale);
    let best_x = layout.header.right().saturating_sub(pad + best_size.w);
    let best_y = layout.header.y + layout.header.h.saturating_sub(best_size.h) / 2;
    gfx.draw_text_scaled(best_x, best_y, &best_text, COLOR_TEXT, best_scale);

    for (row, cells) in board.grid().iter().enumerate() {
        for (col, &value) in cells.iter().enumerate() {
            let cell = layout.cell_rect(row, col);
            gfx.fill_rect(cell, tile_color(value));
            if value != 0 {
                let label = value.to_string();
                draw_centered(gfx, cell, &label, COLOR_TILE_TEXT, tile_text_scale(&label, layout.tile));
            }
        }
    }
}

pub fn draw_game_over(gfx: &mut dyn Renderer2d, width: u32, height: u32, score: u32, best: u32) {
    let layout = compute_layout(width, height);
    gfx.clear(COLOR_GAME_OVER_BG);

    let area = Rect::new(layout.header.x, layout.header.y, layout.grid.w, layout.header.h + layout.grid.h);
    let max_w = area.w.saturating_sub(2 * layout.margin);
    let title_scale = fit_scale(GAME_OVER_TITLE, layout.text_scale * 2, max_w);
    let hint_scale = fit_scale(GAME_OVER_HINT, layout.text_scale.saturating_sub(1), max_w);
    let scores = format!("SCORE {score}  BEST {best}");
    let scores_scale = fit_scale(&scores, layout.text_scale.saturating_sub(1), max_w);

    // Title above the middle line, hint just below it, scores under the hint.
    let third = area.h / 3;
    let title_band = Rect::new(area.x, area.y + third / 2, area.w, third);
    let hint_band = Rect::new(area.x, area.y + third + third / 2, area.w, third / 2);
    let scores_band = Rect::new(area.x, area.y + 2 * third, area.w, third / 2);

    draw_centered(gfx, title_band, GAME_OVER_TITLE, COLOR_GAME_OVER_TITLE, title_scale);
    draw_centered(gfx, hint_band, GAME_OVER_HINT, COLOR_TEXT, hint_scale);
    draw_centered(gfx, scores_band, &scores, COLOR_TEXT, scores_scale);
}

/// Presents through a frame's renderer, sized to whatever the renderer reports.
pub struct RendererFrontend<'a> {
    gfx: &'a mut dyn Renderer2d,
}

impl<'a> RendererFrontend<'a> {
    pub fn new(gfx: &'a mut dyn Renderer2d) -> Self {
        Self { gfx }
    }
}

impl Frontend for RendererFrontend<'_> {
    fn draw(&mut self, board: &Board, score: u32, best: u32) {
        let size = self.gfx.size();
        draw_board(&mut *self.gfx, size.width, size.height, board, score, best);
    }

    fn draw_game_over(&mut self, score: u32, best: u32) {
        let size = self.gfx.size();
        draw_game_over(&mut *self.gfx, size.width, size.height, score, best);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::graphics::CpuRenderer;
    use engine::surface::{RgbaBufferSurface, Surface, SurfaceSize};

    fn render(width: u32, height: u32, f: impl FnOnce(&mut dyn Frontend)) -> RgbaBufferSurface {
        let size = SurfaceSize::new(width, height);
        let mut surface = RgbaBufferSurface::new(size);
        {
            let mut cpu = CpuRenderer::new(surface.frame_mut(), size);
            let mut frontend = RendererFrontend::new(&mut cpu);
            f(&mut frontend);
        }
        surface
    }

    #[test]
    fn base_size_layout_matches_tile_grid() {
        let layout = compute_layout(BASE_WIDTH, BASE_HEIGHT);
        assert_eq!((BASE_WIDTH, BASE_HEIGHT), (650, 720));
        assert_eq!(layout.grid, Rect::new(0, 70, 650, 650));
        assert_eq!(layout.cell_rect(0, 0), Rect::new(10, 80, 150, 150));
        assert_eq!(layout.cell_rect(3, 3), Rect::new(490, 560, 150, 150));
    }

    #[test]
    fn small_surface_scales_layout_down() {
        let layout = compute_layout(325, 360);
        assert_eq!(layout.tile, 75);
        assert_eq!(layout.margin, 5);
        assert_eq!(layout.header.h, 35);
        assert_eq!(layout.grid, Rect::new(0, 35, 325, 325));
    }

    #[test]
    fn large_surface_centres_without_growing() {
        let layout = compute_layout(1300, 720);
        assert_eq!(layout.tile, TILE_SIZE);
        assert_eq!(layout.grid.x, 325);
        assert!(layout.grid.right() <= 1300);
    }

    #[test]
    fn palette_covers_known_values_and_falls_back_to_white() {
        assert_eq!(tile_color(0), [205, 193, 180, 255]);
        assert_eq!(tile_color(8), [255, 140, 0, 255]);
        assert_eq!(tile_color(2048), [255, 255, 20, 255]);
        assert_eq!(tile_color(4096), [255, 255, 255, 255]);
    }

    #[test]
    fn board_pixels_land_where_the_layout_says() {
        let board = Board::from_grid([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 8]]).unwrap();
        let surface = render(BASE_WIDTH, BASE_HEIGHT, |f| f.draw(&board, 12, 340));

        // Tile corners are clear of the centred digits.
        assert_eq!(surface.pixel(12, 82), Some(tile_color(2)));
        assert_eq!(surface.pixel(170, 82), Some(tile_color(0)));
        assert_eq!(surface.pixel(492, 562), Some(tile_color(8)));
        // Margins between tiles show the background.
        assert_eq!(surface.pixel(5, 75), Some(COLOR_BACKGROUND));
        assert_eq!(surface.pixel(164, 200), Some(COLOR_BACKGROUND));
    }

    #[test]
    fn tile_digits_are_drawn_in_dark_text() {
        let board = Board::from_grid([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let surface = render(BASE_WIDTH, BASE_HEIGHT, |f| f.draw(&board, 0, 0));
        let cell = compute_layout(BASE_WIDTH, BASE_HEIGHT).cell_rect(0, 0);

        let dark = (cell.y..cell.bottom())
            .flat_map(|y| (cell.x..cell.right()).map(move |x| (x, y)))
            .filter(|&(x, y)| surface.pixel(x, y) == Some(COLOR_TILE_TEXT))
            .count();
        assert!(dark > 0);
    }

    #[test]
    fn header_text_is_white() {
        let surface = render(BASE_WIDTH, BASE_HEIGHT, |f| f.draw(&Board::empty(), 1024, 2048));
        let white = (0..HEADER_HEIGHT)
            .flat_map(|y| (0..BASE_WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| surface.pixel(x, y) == Some(COLOR_TEXT))
            .count();
        assert!(white > 0);
    }

    #[test]
    fn game_over_screen_has_red_title_and_white_hint() {
        let surface = render(BASE_WIDTH, BASE_HEIGHT, |f| f.draw_game_over(100, 200));
        assert_eq!(surface.pixel(1, 1), Some(COLOR_GAME_OVER_BG));

        let count = |color: Color| {
            (0..BASE_HEIGHT)
                .flat_map(|y| (0..BASE_WIDTH).map(move |x| (x, y)))
                .filter(|&(x, y)| surface.pixel(x, y) == Some(color))
                .count()
        };
        assert!(count(COLOR_GAME_OVER_TITLE) > 0);
        assert!(count(COLOR_TEXT) > 0);
    }

    #[test]
    fn long_text_shrinks_to_fit() {
        let scale = fit_scale(GAME_OVER_HINT, 10, 300);
        assert!(text_size(GAME_OVER_HINT, scale).w <= 300 || scale == 1);
        assert_eq!(fit_scale("A", 4, 1_000), 4);
    }
}
