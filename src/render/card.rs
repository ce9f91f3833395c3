//! Creature infographic card composition.

use crate::{
    config::InfoGraphicConfig,
    foundation::{core::Rgba8, error::CardResult},
    lookup::{ColorLookup, StringProvider},
    model::{CreatureData, ServerSettings, Sex, SpeciesInfo},
    render::{
        graphic::{
            color_from_percent, fore_color, header_text, region_label, sex_symbol, stat_name,
            to_fixed,
        },
        layout::{Layout, compute_layout},
        svg::{EllipseAttrs, FontWeight, LineAttrs, RectAttrs, SvgBuilder, TextAnchor, TextAttrs},
    },
    stats::{COLOR_REGION_COUNT, DISPLAY_ORDER, TORPIDITY, is_percentage},
};

const TRACK_COLOR: Rgba8 = Rgba8::rgb(169, 169, 169);
const GLOW_ALPHA: u8 = 10;
const SEPARATOR_ALPHA: u8 = 50;

/// Text styling shared by every label on one card.
struct Pen<'a> {
    family: &'a str,
    fill: Rgba8,
}

impl Pen<'_> {
    fn at(&self, size: i32) -> TextAttrs {
        TextAttrs {
            font_family: Some(self.family.to_string()),
            font_size: Some(f64::from(size)),
            font_weight: FontWeight::Normal,
            fill: Some(self.fill),
            anchor: TextAnchor::Start,
        }
    }

    fn right(&self, size: i32) -> TextAttrs {
        TextAttrs {
            anchor: TextAnchor::End,
            ..self.at(size)
        }
    }

    fn bold(&self, size: i32) -> TextAttrs {
        TextAttrs {
            font_weight: FontWeight::Bold,
            ..self.at(size)
        }
    }
}

fn px(v: i32) -> f64 {
    f64::from(v)
}

/// Render the infographic card of one creature as an SVG document.
///
/// `creature_image_href` is embedded as-is (data URI or path); the image is only placed when the
/// layout leaves enough room for it.
#[tracing::instrument(skip_all, fields(species = %creature.species_name))]
pub fn render_infographic_svg(
    creature: &CreatureData,
    species: &SpeciesInfo,
    server: &ServerSettings,
    config: &InfoGraphicConfig,
    colors: &dyn ColorLookup,
    strings: &dyn StringProvider,
    creature_image_href: Option<&str>,
) -> CardResult<String> {
    let layout = compute_layout(config, creature, server);
    let pen = Pen {
        family: config.font_family(),
        fill: config.fore_color,
    };
    let mut svg = SvgBuilder::new(px(layout.width), px(layout.height));

    svg.rect(
        0.0,
        0.0,
        px(layout.width),
        px(layout.height),
        RectAttrs::filled(config.back_color),
    );

    draw_header(&mut svg, &layout, &pen, creature, server, config, strings);
    draw_column_headers(&mut svg, &layout, &pen, config, strings);
    draw_stat_rows(&mut svg, &layout, &pen, creature, species, config, strings);

    let image_shown = layout.shows_image(creature_image_href.is_some());
    if let Some(href) = creature_image_href.filter(|_| image_shown) {
        let (x, y) = layout.image_origin();
        svg.image(
            href,
            px(x),
            px(y),
            px(layout.image_size),
            px(layout.image_size),
        );
    }

    draw_colors(
        &mut svg,
        &layout,
        &pen,
        creature,
        species,
        config,
        colors,
        strings,
        image_shown,
    );

    if creature.is_mutagen_applied {
        svg.text(
            strings.get_string("Mutagen applied"),
            px(layout.x_color),
            px(layout.footer_y()),
            pen.at(layout.font_size_small),
        );
    }

    if config.display_max_wild_level {
        svg.text(
            format!(
                "{}: {}",
                strings.get_string("max wild level"),
                server.max_wild_level
            ),
            px(layout.footer_right_x()),
            px(layout.footer_y()),
            pen.right(layout.font_size_small),
        );
    }

    if layout.border_width > 0 {
        let inset = layout.border_inset();
        svg.rect(
            inset,
            inset,
            px(layout.width - layout.border_width),
            px(layout.height - layout.border_width),
            RectAttrs::stroked(config.border_color, px(layout.border_width)),
        );
    }

    svg.finish()
}

/// "Level a/b | sex (neutered) | Mut n | Gen n"
fn info_line(
    creature: &CreatureData,
    server: &ServerSettings,
    config: &InfoGraphicConfig,
    strings: &dyn StringProvider,
) -> String {
    let level = if config.display_dom_levels {
        format!(
            "{}/{}",
            creature.level,
            creature.level_hatched + server.max_dom_level
        )
    } else {
        creature.level_hatched.to_string()
    };

    let mut info = format!(
        "{} {level} | {}",
        strings.get_string("Level"),
        sex_symbol(creature.sex)
    );
    if creature.is_neutered {
        let key = if creature.sex == Sex::Female {
            "Spayed"
        } else {
            "Neutered"
        };
        info.push_str(&format!(" ({})", strings.get_string(key)));
    }
    if config.display_mutations {
        info.push_str(&format!(
            " | {} {}",
            strings.get_string("mutation counter"),
            creature.mutations
        ));
    }
    if config.display_generation {
        info.push_str(&format!(
            " | {} {}",
            strings.get_string("generation"),
            creature.generation
        ));
    }
    info
}

fn draw_header(
    svg: &mut SvgBuilder,
    layout: &Layout,
    pen: &Pen<'_>,
    creature: &CreatureData,
    server: &ServerSettings,
    config: &InfoGraphicConfig,
    strings: &dyn StringProvider,
) {
    let x = px(layout.border_and_padding);
    svg.text(
        header_text(creature, server, config.display_creature_name),
        x,
        px(layout.y_header + layout.header_font_size),
        pen.bold(layout.header_font_size),
    );

    let info = info_line(creature, server, config, strings);
    let info_size = layout.info_font_size(&info);
    svg.text(
        info,
        x,
        px(layout.y_info + info_size),
        pen.at(info_size),
    );

    svg.line(
        px(layout.border_width),
        px(layout.y_separator),
        px(layout.width - layout.border_width),
        px(layout.y_separator),
        LineAttrs {
            stroke: Some(pen.fill.with_alpha(SEPARATOR_ALPHA)),
            stroke_width: Some(1.0),
            opacity: None,
        },
    );
}

fn draw_column_headers(
    svg: &mut SvgBuilder,
    layout: &Layout,
    pen: &Pen<'_>,
    config: &InfoGraphicConfig,
    strings: &dyn StringProvider,
) {
    let y = px(layout.y_columns + layout.font_size);

    let mut wild = strings.get_string("W");
    if config.display_sum_wild_mut_levels {
        wild.push('+');
        wild.push_str(&strings.get_string("M"));
    }
    svg.text(
        wild,
        px(layout.x_right_level_value - layout.w_header_shift),
        y,
        pen.right(layout.font_size),
    );

    if layout.display_mutated_levels {
        svg.text(
            strings.get_string("M"),
            px(layout.x_right_level_mut_value - layout.mut_header_shift),
            y,
            pen.right(layout.font_size),
        );
    }
    if config.display_dom_levels {
        svg.text(
            strings.get_string("D"),
            px(layout.x_right_level_dom_value),
            y,
            pen.right(layout.font_size),
        );
    }
    if config.display_stat_values {
        svg.text(
            strings.get_string("Values"),
            px(layout.x_right_br_value),
            y,
            pen.right(layout.font_size),
        );
    }
}

fn draw_stat_rows(
    svg: &mut SvgBuilder,
    layout: &Layout,
    pen: &Pen<'_>,
    creature: &CreatureData,
    species: &SpeciesInfo,
    config: &InfoGraphicConfig,
    strings: &dyn StringProvider,
) {
    let x = px(layout.x_stat_name);
    let box_height = px(layout.stat_box_height);
    let more_columns = layout.display_mutated_levels || config.display_dom_levels;

    let rows = DISPLAY_ORDER
        .iter()
        .copied()
        .filter(|&si| si != TORPIDITY && species.used_stats[si]);

    for (row, si) in rows.enumerate() {
        let wild = creature.levels_wild[si];
        let geo = layout.stat_row(row, wild);
        let bar_y = px(geo.bar_y);
        let bar_len = px(geo.bar_length);
        let text_y = px(geo.text_y);

        svg.rect(
            x,
            bar_y,
            px(layout.max_box_length),
            box_height,
            RectAttrs::filled(TRACK_COLOR),
        );

        let bar_color = color_from_percent(geo.percent, 0.0, false);
        svg.rect(x, bar_y, bar_len, box_height, RectAttrs::filled(bar_color));
        for r in (1..=4).rev() {
            let r = f64::from(r);
            svg.rect(
                x - r,
                bar_y - 1.0 - r,
                bar_len + 2.0 * r,
                box_height + 2.0 * r,
                RectAttrs::filled(bar_color.with_alpha(GLOW_ALPHA)),
            );
        }
        svg.rect(
            x,
            bar_y,
            bar_len,
            box_height,
            RectAttrs::stroked(color_from_percent(geo.percent, -0.5, false), 1.0),
        );

        svg.text(
            stat_name(si, true, species.stat_names.as_ref(), strings),
            x,
            text_y,
            pen.at(layout.font_size),
        );

        let suffix = if more_columns { " |" } else { "" };
        let level_text = if wild < 0 {
            format!("?{suffix}")
        } else {
            let summed_mutations = match creature.levels_mutated {
                Some(m) if config.display_sum_wild_mut_levels && m[si] > 0 => m[si],
                _ => 0,
            };
            format!("{}{suffix}", wild + summed_mutations)
        };
        svg.text(
            level_text,
            px(layout.x_right_level_value),
            text_y,
            pen.right(layout.font_size),
        );

        if layout.display_mutated_levels
            && let Some(mutated) = creature.levels_mutated
        {
            let text = if mutated[si] < 0 {
                String::new()
            } else if config.display_dom_levels {
                format!("{} |", mutated[si])
            } else {
                mutated[si].to_string()
            };
            svg.text(
                text,
                px(layout.x_right_level_mut_value),
                text_y,
                pen.right(layout.font_size),
            );
        }

        if config.display_dom_levels {
            svg.text(
                creature.levels_dom[si].to_string(),
                px(layout.x_right_level_dom_value),
                text_y,
                pen.right(layout.font_size),
            );
        }

        if config.display_stat_values {
            let value = if config.display_dom_levels {
                creature.values_current[si]
            } else {
                creature.values_breeding[si]
            };
            let value_text = if value < 0.0 {
                "?".to_string()
            } else if is_percentage(si) {
                svg.text(
                    "%",
                    px(layout.x_right_br_value),
                    text_y,
                    pen.at(layout.font_size),
                );
                to_fixed(100.0 * value, 1)
            } else {
                to_fixed(value, 1)
            };
            svg.text(
                value_text,
                px(layout.x_right_br_value),
                text_y,
                pen.right(layout.font_size),
            );
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_colors(
    svg: &mut SvgBuilder,
    layout: &Layout,
    pen: &Pen<'_>,
    creature: &CreatureData,
    species: &SpeciesInfo,
    config: &InfoGraphicConfig,
    colors: &dyn ColorLookup,
    strings: &dyn StringProvider,
    image_shown: bool,
) {
    let header_y = px(layout.y_columns + layout.font_size);
    let colors_label = strings.get_string("Colors");
    svg.text(
        colors_label.as_str(),
        px(layout.x_color),
        header_y,
        pen.at(layout.font_size),
    );

    if config.display_dom_levels {
        let x = px(layout.imprinting_x(&colors_label));
        if creature.is_bred || creature.imprinting_bonus > 0.0 {
            svg.text(
                format!("Imp: {} %", to_fixed(creature.imprinting_bonus * 100.0, 1)),
                x,
                header_y,
                pen.at(layout.font_size),
            );
        } else if creature.taming_effectiveness >= 0.0 {
            svg.text(
                format!("TE: {} %", to_fixed(creature.taming_effectiveness * 100.0, 1)),
                x,
                header_y,
                pen.at(layout.font_size),
            );
        }
    }

    let swatch_border = fore_color(config.back_color);
    let show_names = config.display_extra_region_names
        || (!image_shown && config.display_region_names_if_no_image);
    let max_name_len = layout.max_color_name_length(image_shown);
    let radius = layout.circle_radius();
    let cx = px(layout.x_color) + radius;

    let regions = (0..COLOR_REGION_COUNT).filter(|&ci| species.enabled_color_regions[ci]);
    for (row, ci) in regions.enumerate() {
        let y = layout.color_row_y(row);
        let cy = px(y) + radius;
        let color_id = creature.colors[ci];

        svg.ellipse(
            cx,
            cy,
            radius,
            radius,
            EllipseAttrs {
                fill: Some(colors.get_color(color_id)),
                ..EllipseAttrs::default()
            },
        );
        svg.ellipse(
            cx,
            cy,
            radius,
            radius,
            EllipseAttrs {
                fill: None,
                stroke: Some(swatch_border),
                stroke_width: Some(1.0),
            },
        );

        let name = species.color_region_names[ci]
            .as_deref()
            .filter(|_| show_names)
            .and_then(|n| region_label(n, max_name_len))
            .unwrap_or_default();
        svg.text(
            format!("[{ci}] {color_id}{name}"),
            px(layout.swatch_label_x()),
            px(y + layout.font_size_small),
            pen.at(layout.font_size_small),
        );
    }
}
