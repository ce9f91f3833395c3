//! Card geometry.
//!
//! Every coordinate and font size of the card is derived here from the config, the creature and
//! the server limits. Integer divisions truncate; column widths depend on how many digits the
//! creature's numbers need, so cards for different creatures get different column positions.

use crate::{
    config::InfoGraphicConfig,
    model::{CreatureData, ServerSettings},
    render::graphic::{header_text, text_len},
    stats::{STATS_COUNT, TORPIDITY, precision},
};

/// Height used when the configured one is unusable.
pub const DEFAULT_HEIGHT: i32 = 180;

/// Tallest card rendered; larger heights are clamped to it.
pub const MAX_HEIGHT: i32 = 1 << 16;

/// Smallest font size auto-shrinking may produce.
pub const MIN_FONT_SIZE: i32 = 5;

/// Resolved card geometry. Recomputed from scratch for each render.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub width: i32,
    pub height: i32,
    pub content_width: i32,
    pub content_height: i32,
    pub border_width: i32,
    pub padding: i32,
    pub border_and_padding: i32,

    pub font_size: i32,
    pub font_size_small: i32,
    pub font_size_header: i32,
    /// Header font after shrinking the header text to the content width.
    pub header_font_size: i32,

    pub stat_line_height: i32,
    /// Estimated width of one character at `font_size`.
    pub mean_letter_width: f64,
    pub stat_box_height: i32,

    // right edges for right-aligned columns
    pub x_stat_name: i32,
    pub x_right_level_value: i32,
    pub x_right_level_mut_value: i32,
    pub x_right_level_dom_value: i32,
    pub x_right_br_value: i32,
    pub max_box_length: i32,

    pub x_color: i32,
    pub circle_diameter: i32,
    pub color_row_height: i32,

    pub display_mutated_levels: bool,
    /// Room kept free at the bottom for the max wild level footer.
    pub extra_margin_bottom: i32,

    pub y_header: i32,
    pub y_info: i32,
    pub y_separator: i32,
    pub y_columns: i32,
    /// Top of the first stat row and of the first color swatch.
    pub y_rows: i32,

    /// Left shift of the wild level column header.
    pub w_header_shift: i32,
    /// Left shift of the mutated level column header.
    pub mut_header_shift: i32,

    pub max_graph_level: i32,
    /// Edge length of the creature image; only drawn when larger than 5.
    pub image_size: i32,
}

/// Placement of one stat row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatRowGeometry {
    pub text_y: i32,
    pub bar_y: i32,
    pub bar_length: i32,
    /// Wild level relative to the chart maximum, `0..=100`.
    pub percent: i32,
}

/// Shrink `font_size` so `char_count` characters fit into `available` pixels.
pub fn shrink_font_size(
    char_count: usize,
    font_size: i32,
    letter_width: f64,
    available: i32,
) -> i32 {
    let estimated = char_count as f64 * letter_width;
    if estimated > f64::from(available) {
        let scaled = (f64::from(font_size) * f64::from(available) / estimated).trunc() as i32;
        let shrunk = scaled.max(MIN_FONT_SIZE);
        tracing::debug!(char_count, font_size, shrunk, "shrinking text");
        shrunk
    } else {
        font_size
    }
}

fn digits(v: i32) -> i32 {
    v.to_string().len() as i32
}

/// Widest formatted stat value: integer digits plus the stat's decimals.
fn max_char_length(values: &[f64; STATS_COUNT]) -> i32 {
    values
        .iter()
        .enumerate()
        .map(|(si, v)| (v.trunc() as i64).to_string().len() as i32 + precision(si) as i32)
        .max()
        .unwrap_or(0)
}

fn trunc(v: f64) -> i32 {
    v.trunc() as i32
}

#[tracing::instrument(skip_all, fields(height = config.height))]
pub fn compute_layout(
    config: &InfoGraphicConfig,
    creature: &CreatureData,
    server: &ServerSettings,
) -> Layout {
    let height = if config.height < 5 {
        DEFAULT_HEIGHT
    } else {
        config.height.min(MAX_HEIGHT)
    };
    let border_width = config.border_width.clamp(0, height / 2);
    let content_height = height - 2 * border_width;
    let content_width = content_height * 12 / 6;
    let mut width = content_width + 2 * border_width;
    if config.display_extra_region_names {
        width += content_height / 2;
    }
    let padding = 3 * (height / 180).max(1);
    let border_and_padding = border_width + padding;

    let font_size = (content_height / 18).max(MIN_FONT_SIZE);
    let font_size_small = (content_height * 2 / 45).max(MIN_FONT_SIZE);
    let font_size_header = (content_height / 15).max(MIN_FONT_SIZE);
    let stat_line_height = content_height * 5 / 59;
    let mean_letter_width = f64::from(font_size) * 7.0 / 10.0;
    let stat_box_height = (content_height / 90).max(2);

    let header = header_text(creature, server, config.display_creature_name);
    let header_font_size = shrink_font_size(
        text_len(&header),
        font_size_header,
        f64::from(font_size_header) * 0.7,
        content_width,
    );

    let x_stat_name = border_and_padding;
    let display_mutated_levels = !config.display_sum_wild_mut_levels
        && creature.levels_mutated.is_some()
        && server.is_asa();

    let torpidity_digits = digits(creature.levels_wild[TORPIDITY]);
    let x_right_level_value =
        trunc(f64::from(x_stat_name) + f64::from(6 + torpidity_digits) * mean_letter_width);

    let mut x_right_level_mut_value = x_right_level_value;
    if display_mutated_levels && let Some(mutated) = &creature.levels_mutated {
        let max_mut = mutated.iter().copied().max().unwrap_or(0);
        x_right_level_mut_value += trunc(f64::from(digits(max_mut) + 2) * mean_letter_width);
    }

    let mut x_right_level_dom_value = x_right_level_mut_value;
    if config.display_dom_levels {
        let max_dom = creature.levels_dom.iter().copied().max().unwrap_or(0);
        x_right_level_dom_value += trunc(f64::from(digits(max_dom) + 1) * mean_letter_width);
    }

    let x_right_br_value = trunc(
        f64::from(x_right_level_dom_value)
            + f64::from(2 + max_char_length(&creature.values_breeding)) * mean_letter_width,
    );
    let max_box_length = x_right_br_value - x_stat_name;

    let x_color = trunc(f64::from(x_right_br_value) + mean_letter_width * 3.5);
    let circle_diameter = content_height * 4 / 45;
    let color_row_height = circle_diameter + 2;

    let extra_margin_bottom = if config.display_max_wild_level {
        font_size_small
    } else {
        0
    };

    let y_header = border_and_padding;
    let y_info = y_header + content_height * 19 / 180;
    let y_separator = y_info + content_height * 17 / 180;
    let y_columns = y_separator + 2;
    let y_rows = y_columns + content_height / 9;

    let letter_shift = trunc(mean_letter_width);
    let w_header_shift = if display_mutated_levels || config.display_dom_levels {
        letter_shift
    } else {
        0
    };
    let mut_header_shift = if config.display_dom_levels {
        letter_shift
    } else {
        0
    };

    let image_size = trunc(
        (f64::from(content_width - x_color + border_width - circle_diameter)
            - 8.0 * mean_letter_width)
            .min(f64::from(
                content_height - y_columns + border_width - extra_margin_bottom,
            )),
    );

    Layout {
        width,
        height,
        content_width,
        content_height,
        border_width,
        padding,
        border_and_padding,
        font_size,
        font_size_small,
        font_size_header,
        header_font_size,
        stat_line_height,
        mean_letter_width,
        stat_box_height,
        x_stat_name,
        x_right_level_value,
        x_right_level_mut_value,
        x_right_level_dom_value,
        x_right_br_value,
        max_box_length,
        x_color,
        circle_diameter,
        color_row_height,
        display_mutated_levels,
        extra_margin_bottom,
        y_header,
        y_info,
        y_separator,
        y_columns,
        y_rows,
        w_header_shift,
        mut_header_shift,
        max_graph_level: server.max_chart_level.max(1),
        image_size,
    }
}

impl Layout {
    /// Font size for the creature info line.
    pub fn info_font_size(&self, info: &str) -> i32 {
        shrink_font_size(
            text_len(info),
            self.font_size,
            self.mean_letter_width,
            self.width - 2 * self.border_and_padding,
        )
    }

    /// Geometry of the `row`-th displayed stat for a creature with `level_wild` wild levels.
    pub fn stat_row(&self, row: usize, level_wild: i32) -> StatRowGeometry {
        let y = self.y_rows + row as i32 * self.stat_line_height;
        let fraction = (f64::from(level_wild) / f64::from(self.max_graph_level)).clamp(0.0, 1.0);
        StatRowGeometry {
            text_y: y + self.font_size,
            bar_y: y + self.stat_line_height - 1,
            bar_length: trunc(f64::from(self.max_box_length) * fraction).max(1),
            percent: trunc(100.0 * fraction),
        }
    }

    /// Top of the `row`-th color swatch.
    pub fn color_row_y(&self, row: usize) -> i32 {
        self.y_rows + row as i32 * self.color_row_height
    }

    pub fn circle_radius(&self) -> f64 {
        f64::from(self.circle_diameter) / 2.0
    }

    pub fn swatch_label_x(&self) -> i32 {
        self.x_color + self.circle_diameter + 4
    }

    pub fn shows_image(&self, has_image: bool) -> bool {
        has_image && self.image_size > 5
    }

    /// Top-left corner of the creature image, anchored bottom-right.
    pub fn image_origin(&self) -> (i32, i32) {
        (
            self.width - self.image_size - self.border_and_padding,
            self.height - self.image_size - self.border_and_padding - self.extra_margin_bottom,
        )
    }

    /// Characters available for a swatch label, region name included.
    pub fn max_color_name_length(&self, image_shown: bool) -> i32 {
        let image = if image_shown { self.image_size } else { 0 };
        let free =
            self.width - 2 * self.border_width - self.x_color - self.circle_diameter - image;
        trunc(f64::from(free) * 1.5 / self.mean_letter_width).max(0)
    }

    /// X of the imprinting / taming effectiveness text following the colors header.
    pub fn imprinting_x(&self, colors_label: &str) -> i32 {
        self.x_color + trunc((text_len(colors_label) + 3) as f64 * self.mean_letter_width)
    }

    /// Baseline of the footer texts.
    pub fn footer_y(&self) -> i32 {
        self.height - self.border_and_padding
    }

    pub fn footer_right_x(&self) -> i32 {
        self.width - self.border_and_padding
    }

    /// Card border stroke is centered on this inset.
    pub fn border_inset(&self) -> f64 {
        f64::from(self.border_width) / 2.0
    }
}
