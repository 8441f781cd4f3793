// ANSI terminal rendering for the wall and the quest-style chrome.
//
// All presentation lives here: the 256-colour stride palette, the
// top-down wall display, the banner, the character-by-character "retro"
// printing, and the end-of-run efficiency report. The sim crate knows
// nothing about any of this — rendering reads the annotated wall through
// its public accessors only.
//
// Colour scheme: each stride maps to a (bright, dark) pair of ANSI
// 256-colour codes; unplaced bricks use the dark shade and placed bricks
// the bright one, so progress is visible inside each stride rectangle.

use masonry_sim::estimate::{CostReport, Metrics};
use masonry_sim::types::{BrickKind, Strategy, StrideLabel};
use masonry_sim::wall::Wall;
use std::io::Write;
use std::time::Duration;

const RESET: &str = "\x1b[0m";

/// (bright, dark) 256-colour pairs, cycled per stride. The dark shade is
/// the same hue, so a stride reads as one region at a glance.
const STRIDE_COLOR_PAIRS: [(&str, &str); 8] = [
    ("\x1b[38;5;196m", "\x1b[38;5;88m"),  // red
    ("\x1b[38;5;208m", "\x1b[38;5;130m"), // orange
    ("\x1b[38;5;226m", "\x1b[38;5;142m"), // yellow
    ("\x1b[38;5;46m", "\x1b[38;5;28m"),   // green
    ("\x1b[38;5;51m", "\x1b[38;5;25m"),   // cyan
    ("\x1b[38;5;99m", "\x1b[38;5;54m"),   // purple
    ("\x1b[38;5;213m", "\x1b[38;5;162m"), // pink
    ("\x1b[38;5;250m", "\x1b[38;5;240m"), // grey
];

pub fn clear_screen() {
    print!("\x1b[2J\x1b[H");
    let _ = std::io::stdout().flush();
}

/// Print one character at a time for the retro terminal feel. A zero
/// delay degrades to a plain `println!`.
pub fn retro_print(text: &str, delay: Duration) {
    if delay.is_zero() {
        println!("{text}");
        return;
    }
    for c in text.chars() {
        print!("{c}");
        let _ = std::io::stdout().flush();
        std::thread::sleep(delay);
    }
    println!();
}

pub fn banner(animated: bool, delay: Duration) {
    let plate = [
        "╔═══════════════════════════════════════════════╗",
        "║          MASONRY WALL QUEST SIMULATOR         ║",
        "╚═══════════════════════════════════════════════╝",
    ];
    clear_screen();
    for line in plate {
        if animated {
            retro_print(line, delay);
        } else {
            println!("{line}");
        }
    }
    println!();
}

pub fn intro(delay: Duration) {
    banner(true, delay);
    retro_print("┌───────────────────────────────────────────────┐", delay);
    retro_print("│ Welcome, brave builder! Your quest begins...  │", delay);
    retro_print("└───────────────────────────────────────────────┘", delay);
    println!();
}

fn stride_colors(label: StrideLabel) -> (&'static str, &'static str) {
    match label {
        StrideLabel::Assigned(id) => {
            let idx = (id.block as usize * 3 + id.substride as usize) % STRIDE_COLOR_PAIRS.len();
            STRIDE_COLOR_PAIRS[idx]
        }
        // Sentinel or gap: grey, so assigner bugs are visible on screen.
        _ => STRIDE_COLOR_PAIRS[7],
    }
}

/// Draw the wall top-down (courses are stored bottom-up).
pub fn draw_wall(wall: &Wall) {
    println!("The top of the wall.");
    for course in wall.courses().iter().rev() {
        let mut line = String::new();
        for cell in course {
            match cell.kind {
                BrickKind::Gap(units) => {
                    for _ in 0..units {
                        line.push(' ');
                    }
                }
                kind => {
                    let glyph = match (kind, cell.built) {
                        (BrickKind::Full, false) => "░░░░",
                        (BrickKind::Full, true) => "▓▓▓▓",
                        (_, false) => "░░",
                        (_, true) => "▓▓",
                    };
                    let (bright, dark) = stride_colors(cell.label);
                    let color = if cell.built { bright } else { dark };
                    line.push_str(color);
                    line.push_str(glyph);
                    line.push_str(RESET);
                }
            }
            line.push(' ');
        }
        println!("{}", line.trim_end());
    }
    println!();
}

/// The end-of-run scroll: metrics, projected cost, and a grade derived
/// from the stride-vs-sequential comparison.
pub fn efficiency_report(
    strategy: Strategy,
    metrics: &Metrics,
    report: &CostReport,
    delay: Duration,
) {
    println!("\n{}", "═".repeat(51));
    retro_print("           ✦ QUEST COMPLETION SCROLL ✦", delay);
    println!("{}\n", "═".repeat(51));

    match strategy {
        Strategy::Sequential => {
            retro_print("You have finished the wall by hand...", delay);
            retro_print("With sweat and tears, each brick was placed.", delay);
            retro_print("But alas... the scroll reveals some truths:", delay);
            println!();
            retro_print(
                &format!(" ▒ Total Bricks Placed     : {}", metrics.total_bricks),
                delay,
            );
            retro_print(" ▒ Number of Strides Taken : — (inefficient)", delay);
            retro_print(" ▒ Avg Bricks per Stride   : —", delay);
            retro_print(
                &format!(" ▒ Estimated Build Time    : {:.1} sec", report.time_seconds),
                delay,
            );
            retro_print(
                &format!(" ▒ Estimated Energy Used   : {:.2} kWh", report.energy_kwh),
                delay,
            );
            println!();
            retro_print(" Grade: C+", delay);
            retro_print(" Comment: Honourable effort, but the robot weeps...", delay);
            retro_print(" Hint: Try using stride mode for glory.", delay);
        }
        Strategy::Stride => {
            retro_print("Stride protocol: ENGAGED.", delay);
            retro_print("The robot moves with mechanical precision.", delay);
            retro_print("Let the scroll of excellence be unfurled:", delay);
            println!();
            retro_print(
                &format!(" ▒ Total Bricks Placed     : {}", metrics.total_bricks),
                delay,
            );
            retro_print(
                &format!(
                    " ▒ Number of Strides Used  : {} (efficient)",
                    metrics.total_strides
                ),
                delay,
            );
            retro_print(
                &format!(
                    " ▒ Avg Bricks per Stride   : {:.2}",
                    metrics.avg_bricks_per_stride
                ),
                delay,
            );
            retro_print(
                &format!(" ▒ Estimated Build Time    : {:.1} sec", report.time_seconds),
                delay,
            );
            retro_print(
                &format!(" ▒ Estimated Energy Used   : {:.2} kWh", report.energy_kwh),
                delay,
            );
            println!();
            retro_print(" Grade: S", delay);
            retro_print(" Comment: You are a master of efficiency and bricks.", delay);
            retro_print(" The wall stands tall. Glory is yours.", delay);
        }
    }
    println!();
}
