//! The content-stream interpreter.
//!
//! Tokenizes a decoded content stream and dispatches each operator to a
//! [`RenderDevice`] method through a sorted table and binary search.
//! Dispatch is permissive: unknown operators and arity or type mismatches
//! are logged and skipped, and the operand stack is cleared after every
//! operator so one bad invocation cannot contaminate the next.

use tracing::{trace, warn};

use crate::device::RenderDevice;
use crate::operand::{Operand, OperandStack};
use crate::resources::Resources;
use crate::tokenizer::{Token, Tokenizer};

/// Operator handler: validates operands and calls into the device.
type Handler = fn(&mut dyn RenderDevice, &Resources<'_>, &OperandStack);

/// Dispatch table, sorted by operator name (byte order) for binary search.
static DISPATCH_TABLE: &[(&str, Handler)] = &[
    ("\"", op_move_show_text_spaced),
    ("'", op_move_show_text),
    ("B", op_fill_stroke),
    ("B*", op_fill_stroke_even_odd),
    ("BT", op_begin_text),
    ("CS", op_stroke_color_space),
    ("ET", op_end_text),
    ("G", op_stroke_gray),
    ("K", op_stroke_cmyk),
    ("Q", op_restore_state),
    ("RG", op_stroke_rgb),
    ("S", op_stroke),
    ("SC", op_stroke_color_components),
    ("SCN", op_stroke_color_components),
    ("T*", op_next_line),
    ("TD", op_move_text_set_leading),
    ("TJ", op_show_text_kerning),
    ("TL", op_text_leading),
    ("Tc", op_char_spacing),
    ("Td", op_move_text),
    ("Tf", op_set_font),
    ("Tj", op_show_text),
    ("Tm", op_text_matrix),
    ("Tr", op_text_rendering_mode),
    ("Tw", op_word_spacing),
    ("W", op_clip),
    ("W*", op_clip_even_odd),
    ("b", op_close_fill_stroke),
    ("b*", op_close_fill_stroke_even_odd),
    ("c", op_curve_to),
    ("cm", op_concat_matrix),
    ("cs", op_fill_color_space),
    ("d", op_dash),
    ("f", op_fill),
    ("f*", op_fill_even_odd),
    ("g", op_fill_gray),
    ("gs", op_ext_g_state),
    ("h", op_close_path),
    ("k", op_fill_cmyk),
    ("l", op_line_to),
    ("m", op_move_to),
    ("n", op_end_path),
    ("q", op_save_state),
    ("re", op_rectangle),
    ("rg", op_fill_rgb),
    ("sc", op_fill_color_components),
    ("scn", op_fill_color_components),
    ("w", op_line_width),
];

/// Interpret one decoded content stream, driving `device`.
///
/// Runs to end of input unconditionally; per-operator failures degrade to
/// no-ops (they are logged at `warn`). `F` — the uppercase alias of `f` —
/// is folded to its lowercase form before lookup.
pub fn process_content_stream(
    device: &mut dyn RenderDevice,
    content: &[u8],
    resources: &Resources<'_>,
) {
    let mut tokenizer = Tokenizer::new(content);
    let mut stack = OperandStack::new();

    while let Some(token) = tokenizer.next_token() {
        match token {
            Token::Number(v) => stack.push(Operand::Number(v)),
            Token::Name(n) => stack.push(Operand::Name(n)),
            Token::String(s) => stack.push(Operand::String(s)),
            Token::ArrayOpen | Token::ArrayClose => {}
            Token::Operator(name) => {
                let key = if name == "F" { "f" } else { name.as_str() };
                match DISPATCH_TABLE.binary_search_by(|probe| probe.0.cmp(key)) {
                    Ok(index) => {
                        trace!(operator = %name, operands = stack.len(), "dispatch");
                        (DISPATCH_TABLE[index].1)(device, resources, &stack);
                    }
                    Err(_) => warn!(operator = %name, "unknown operator, skipping"),
                }
                stack.clear();
            }
        }
    }
}

// --- Graphics state ---

fn op_save_state(device: &mut dyn RenderDevice, _: &Resources<'_>, _: &OperandStack) {
    device.save_state();
}

fn op_restore_state(device: &mut dyn RenderDevice, _: &Resources<'_>, _: &OperandStack) {
    device.restore_state();
}

fn op_concat_matrix(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([a, b, c, d, e, f]) = ops.numbers() else {
        return warn_arity("cm");
    };
    device.concat_matrix(a, b, c, d, e, f);
}

fn op_line_width(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([w]) = ops.numbers() else {
        return warn_arity("w");
    };
    device.set_line_width(w);
}

fn op_dash(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    // The array arrives flattened: all numbers, the last one the phase.
    if ops.is_empty() {
        return warn_arity("d");
    }
    let mut values = Vec::with_capacity(ops.len());
    for i in 0..ops.len() {
        match ops.number(i) {
            Some(v) => values.push(v),
            None => return warn_arity("d"),
        }
    }
    let phase = values.pop().unwrap_or(0.0);
    device.set_dash(&values, phase);
}

fn op_ext_g_state(device: &mut dyn RenderDevice, resources: &Resources<'_>, ops: &OperandStack) {
    if ops.len() != 1 {
        return warn_arity("gs");
    }
    let Some(name) = ops.name(0) else {
        return warn_arity("gs");
    };
    device.set_ext_g_state(resources, name);
}

// --- Color ---

fn op_fill_rgb(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([r, g, b]) = ops.numbers() else {
        return warn_arity("rg");
    };
    device.set_fill_rgb(r, g, b);
}

fn op_stroke_rgb(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([r, g, b]) = ops.numbers() else {
        return warn_arity("RG");
    };
    device.set_stroke_rgb(r, g, b);
}

fn op_fill_gray(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([gray]) = ops.numbers() else {
        return warn_arity("g");
    };
    device.set_fill_gray(gray);
}

fn op_stroke_gray(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([gray]) = ops.numbers() else {
        return warn_arity("G");
    };
    device.set_stroke_gray(gray);
}

fn op_fill_cmyk(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([c, m, y, k]) = ops.numbers() else {
        return warn_arity("k");
    };
    device.set_fill_cmyk(c, m, y, k);
}

fn op_stroke_cmyk(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([c, m, y, k]) = ops.numbers() else {
        return warn_arity("K");
    };
    device.set_stroke_cmyk(c, m, y, k);
}

fn op_fill_color_space(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    if ops.len() != 1 {
        return warn_arity("cs");
    }
    let Some(name) = ops.name(0) else {
        return warn_arity("cs");
    };
    device.set_fill_color_space(name);
}

fn op_stroke_color_space(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    if ops.len() != 1 {
        return warn_arity("CS");
    }
    let Some(name) = ops.name(0) else {
        return warn_arity("CS");
    };
    device.set_stroke_color_space(name);
}

fn op_fill_color_components(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    // Component count selects the space: 1 gray, 3 RGB, 4 CMYK. Pattern
    // operands (a trailing name) are not supported and drop the operator.
    if let Some([gray]) = ops.numbers() {
        device.set_fill_gray(gray);
    } else if let Some([r, g, b]) = ops.numbers() {
        device.set_fill_rgb(r, g, b);
    } else if let Some([c, m, y, k]) = ops.numbers() {
        device.set_fill_cmyk(c, m, y, k);
    } else {
        warn_arity("sc");
    }
}

fn op_stroke_color_components(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    if let Some([gray]) = ops.numbers() {
        device.set_stroke_gray(gray);
    } else if let Some([r, g, b]) = ops.numbers() {
        device.set_stroke_rgb(r, g, b);
    } else if let Some([c, m, y, k]) = ops.numbers() {
        device.set_stroke_cmyk(c, m, y, k);
    } else {
        warn_arity("SC");
    }
}

// --- Path construction ---

fn op_move_to(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([x, y]) = ops.numbers() else {
        return warn_arity("m");
    };
    device.move_to(x, y);
}

fn op_line_to(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([x, y]) = ops.numbers() else {
        return warn_arity("l");
    };
    device.line_to(x, y);
}

fn op_curve_to(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([x1, y1, x2, y2, x3, y3]) = ops.numbers() else {
        return warn_arity("c");
    };
    device.curve_to(x1, y1, x2, y2, x3, y3);
}

fn op_rectangle(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([x, y, w, h]) = ops.numbers() else {
        return warn_arity("re");
    };
    device.rectangle(x, y, w, h);
}

fn op_close_path(device: &mut dyn RenderDevice, _: &Resources<'_>, _: &OperandStack) {
    device.close_path();
}

// --- Painting ---

fn op_stroke(device: &mut dyn RenderDevice, _: &Resources<'_>, _: &OperandStack) {
    device.stroke();
}

fn op_fill(device: &mut dyn RenderDevice, _: &Resources<'_>, _: &OperandStack) {
    device.fill();
}

fn op_fill_even_odd(device: &mut dyn RenderDevice, _: &Resources<'_>, _: &OperandStack) {
    device.fill_even_odd();
}

fn op_fill_stroke(device: &mut dyn RenderDevice, _: &Resources<'_>, _: &OperandStack) {
    device.fill_preserve();
    device.stroke();
}

fn op_fill_stroke_even_odd(device: &mut dyn RenderDevice, _: &Resources<'_>, _: &OperandStack) {
    device.fill_preserve_even_odd();
    device.stroke();
}

fn op_close_fill_stroke(device: &mut dyn RenderDevice, _: &Resources<'_>, _: &OperandStack) {
    device.close_path();
    device.fill_preserve();
    device.stroke();
}

fn op_close_fill_stroke_even_odd(
    device: &mut dyn RenderDevice,
    _: &Resources<'_>,
    _: &OperandStack,
) {
    device.close_path();
    device.fill_preserve_even_odd();
    device.stroke();
}

fn op_end_path(device: &mut dyn RenderDevice, _: &Resources<'_>, _: &OperandStack) {
    device.end_path();
}

// --- Clipping ---

fn op_clip(device: &mut dyn RenderDevice, _: &Resources<'_>, _: &OperandStack) {
    device.clip();
}

fn op_clip_even_odd(device: &mut dyn RenderDevice, _: &Resources<'_>, _: &OperandStack) {
    device.clip_even_odd();
}

// --- Text ---

fn op_begin_text(device: &mut dyn RenderDevice, _: &Resources<'_>, _: &OperandStack) {
    device.begin_text();
}

fn op_end_text(device: &mut dyn RenderDevice, _: &Resources<'_>, _: &OperandStack) {
    device.end_text();
}

fn op_set_font(device: &mut dyn RenderDevice, resources: &Resources<'_>, ops: &OperandStack) {
    if ops.len() != 2 {
        return warn_arity("Tf");
    }
    let (Some(name), Some(size)) = (ops.name(0), ops.number(1)) else {
        return warn_arity("Tf");
    };
    device.set_font(resources, name, size);
}

fn op_text_leading(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([leading]) = ops.numbers() else {
        return warn_arity("TL");
    };
    device.set_text_leading(leading);
}

fn op_char_spacing(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([spacing]) = ops.numbers() else {
        return warn_arity("Tc");
    };
    device.set_char_spacing(spacing);
}

fn op_word_spacing(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([spacing]) = ops.numbers() else {
        return warn_arity("Tw");
    };
    device.set_word_spacing(spacing);
}

fn op_move_text(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([tx, ty]) = ops.numbers() else {
        return warn_arity("Td");
    };
    device.move_text_cursor(tx, ty);
}

fn op_move_text_set_leading(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([tx, ty]) = ops.numbers() else {
        return warn_arity("TD");
    };
    device.set_text_leading(-ty);
    device.move_text_cursor(tx, ty);
}

fn op_next_line(device: &mut dyn RenderDevice, _: &Resources<'_>, _: &OperandStack) {
    device.next_line();
}

fn op_text_matrix(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([a, b, c, d, e, f]) = ops.numbers() else {
        return warn_arity("Tm");
    };
    device.set_text_matrix(a, b, c, d, e, f);
}

fn op_text_rendering_mode(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    let Some([mode]) = ops.numbers() else {
        return warn_arity("Tr");
    };
    device.set_text_rendering_mode(mode as i64);
}

fn op_show_text(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    if ops.len() != 1 {
        return warn_arity("Tj");
    }
    let Some(bytes) = ops.string(0) else {
        return warn_arity("Tj");
    };
    device.show_text(bytes);
}

fn op_show_text_kerning(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    if ops.is_empty() {
        return;
    }
    device.show_text_kerning(ops.as_slice());
}

fn op_move_show_text(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    if ops.len() != 1 {
        return warn_arity("'");
    }
    let Some(bytes) = ops.string(0) else {
        return warn_arity("'");
    };
    device.next_line();
    device.show_text(bytes);
}

fn op_move_show_text_spaced(device: &mut dyn RenderDevice, _: &Resources<'_>, ops: &OperandStack) {
    if ops.len() != 3 {
        return warn_arity("\"");
    }
    let (Some(aw), Some(ac), Some(bytes)) = (ops.number(0), ops.number(1), ops.string(2)) else {
        return warn_arity("\"");
    };
    device.set_word_spacing(aw);
    device.set_char_spacing(ac);
    device.next_line();
    device.show_text(bytes);
}

fn warn_arity(operator: &str) {
    warn!(operator, "operand mismatch, operator skipped");
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Device double that records every call as a readable line.
    #[derive(Default)]
    struct RecordingDevice {
        events: Vec<String>,
    }

    impl RecordingDevice {
        fn new() -> Self {
            Self::default()
        }

        fn log(&mut self, event: impl Into<String>) {
            self.events.push(event.into());
        }
    }

    impl RenderDevice for RecordingDevice {
        fn save_state(&mut self) {
            self.log("q");
        }
        fn restore_state(&mut self) {
            self.log("Q");
        }
        fn concat_matrix(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
            self.log(format!("cm {a} {b} {c} {d} {e} {f}"));
        }
        fn set_line_width(&mut self, width: f64) {
            self.log(format!("w {width}"));
        }
        fn set_dash(&mut self, array: &[f64], phase: f64) {
            self.log(format!("d {array:?} {phase}"));
        }
        fn set_fill_rgb(&mut self, r: f64, g: f64, b: f64) {
            self.log(format!("rg {r} {g} {b}"));
        }
        fn set_stroke_rgb(&mut self, r: f64, g: f64, b: f64) {
            self.log(format!("RG {r} {g} {b}"));
        }
        fn set_fill_gray(&mut self, gray: f64) {
            self.log(format!("g {gray}"));
        }
        fn set_stroke_gray(&mut self, gray: f64) {
            self.log(format!("G {gray}"));
        }
        fn set_fill_cmyk(&mut self, c: f64, m: f64, y: f64, k: f64) {
            self.log(format!("k {c} {m} {y} {k}"));
        }
        fn set_stroke_cmyk(&mut self, c: f64, m: f64, y: f64, k: f64) {
            self.log(format!("K {c} {m} {y} {k}"));
        }
        fn set_fill_color_space(&mut self, name: &str) {
            self.log(format!("cs {name}"));
        }
        fn set_stroke_color_space(&mut self, name: &str) {
            self.log(format!("CS {name}"));
        }
        fn set_ext_g_state(&mut self, _resources: &Resources<'_>, name: &str) {
            self.log(format!("gs {name}"));
        }
        fn move_to(&mut self, x: f64, y: f64) {
            self.log(format!("m {x} {y}"));
        }
        fn line_to(&mut self, x: f64, y: f64) {
            self.log(format!("l {x} {y}"));
        }
        fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
            self.log(format!("c {x1} {y1} {x2} {y2} {x3} {y3}"));
        }
        fn rectangle(&mut self, x: f64, y: f64, w: f64, h: f64) {
            self.log(format!("re {x} {y} {w} {h}"));
        }
        fn close_path(&mut self) {
            self.log("h");
        }
        fn stroke(&mut self) {
            self.log("S");
        }
        fn fill(&mut self) {
            self.log("f");
        }
        fn fill_preserve(&mut self) {
            self.log("fill_preserve");
        }
        fn fill_even_odd(&mut self) {
            self.log("f*");
        }
        fn fill_preserve_even_odd(&mut self) {
            self.log("fill_preserve*");
        }
        fn end_path(&mut self) {
            self.log("n");
        }
        fn clip(&mut self) {
            self.log("W");
        }
        fn clip_even_odd(&mut self) {
            self.log("W*");
        }
        fn begin_text(&mut self) {
            self.log("BT");
        }
        fn end_text(&mut self) {
            self.log("ET");
        }
        fn set_font(&mut self, _resources: &Resources<'_>, name: &str, size: f64) {
            self.log(format!("Tf {name} {size}"));
        }
        fn set_text_leading(&mut self, leading: f64) {
            self.log(format!("TL {leading}"));
        }
        fn set_char_spacing(&mut self, spacing: f64) {
            self.log(format!("Tc {spacing}"));
        }
        fn set_word_spacing(&mut self, spacing: f64) {
            self.log(format!("Tw {spacing}"));
        }
        fn move_text_cursor(&mut self, tx: f64, ty: f64) {
            self.log(format!("Td {tx} {ty}"));
        }
        fn next_line(&mut self) {
            self.log("T*");
        }
        fn set_text_matrix(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
            self.log(format!("Tm {a} {b} {c} {d} {e} {f}"));
        }
        fn set_text_rendering_mode(&mut self, mode: i64) {
            self.log(format!("Tr {mode}"));
        }
        fn show_text(&mut self, bytes: &[u8]) -> f64 {
            self.log(format!("Tj {}", String::from_utf8_lossy(bytes)));
            0.0
        }
        fn show_text_kerning(&mut self, operands: &[Operand]) {
            self.log(format!("TJ {} items", operands.len()));
        }
    }

    fn run(content: &[u8]) -> Vec<String> {
        let doc = lopdf::Document::with_version("1.5");
        let resources = Resources::empty(&doc);
        let mut device = RecordingDevice::new();
        process_content_stream(&mut device, content, &resources);
        device.events
    }

    // --- Dispatch table invariants ---

    #[test]
    fn dispatch_table_is_strictly_sorted() {
        for pair in DISPATCH_TABLE.windows(2) {
            assert!(
                pair[0].0 < pair[1].0,
                "table out of order: {:?} !< {:?}",
                pair[0].0,
                pair[1].0
            );
        }
    }

    #[test]
    fn every_required_operator_is_in_the_table() {
        let required = [
            "q", "Q", "cm", "w", "rg", "RG", "g", "G", "k", "K", "cs", "CS", "gs", "m", "l", "c",
            "re", "h", "S", "f", "f*", "B", "B*", "b", "b*", "n", "W", "W*", "BT", "ET", "Tf",
            "Tm", "Td", "TD", "T*", "TL", "Tj", "TJ", "Tr",
        ];
        for op in required {
            assert!(
                DISPATCH_TABLE.binary_search_by(|probe| probe.0.cmp(op)).is_ok(),
                "operator {op:?} missing from table"
            );
        }
    }

    // --- Basic dispatch ---

    #[test]
    fn rectangle_fill_sequence() {
        let events = run(b"1 0 0 rg 100 100 200 150 re f");
        assert_eq!(events, vec!["rg 1 0 0", "re 100 100 200 150", "f"]);
    }

    #[test]
    fn uppercase_f_fills() {
        let events = run(b"0 0 100 100 re F");
        assert_eq!(events, vec!["re 0 0 100 100", "f"]);
    }

    #[test]
    fn save_restore_bracket() {
        let events = run(b"q 0.5 g Q");
        assert_eq!(events, vec!["q", "g 0.5", "Q"]);
    }

    #[test]
    fn fill_and_stroke_composition() {
        assert_eq!(run(b"B"), vec!["fill_preserve", "S"]);
        assert_eq!(run(b"B*"), vec!["fill_preserve*", "S"]);
        assert_eq!(run(b"b"), vec!["h", "fill_preserve", "S"]);
        assert_eq!(run(b"b*"), vec!["h", "fill_preserve*", "S"]);
    }

    #[test]
    fn text_block_sequence() {
        let events = run(b"BT /F1 12 Tf 100 700 Td (Hello) Tj 0 -14 Td (World) Tj ET");
        assert_eq!(
            events,
            vec![
                "BT",
                "Tf F1 12",
                "Td 100 700",
                "Tj Hello",
                "Td 0 -14",
                "Tj World",
                "ET",
            ]
        );
    }

    #[test]
    fn td_sets_leading_then_moves() {
        let events = run(b"10 -14 TD");
        assert_eq!(events, vec!["TL 14", "Td 10 -14"]);
    }

    #[test]
    fn tj_array_flattens_onto_the_stack() {
        let events = run(b"[ (A) 120 (B) ] TJ");
        assert_eq!(events, vec!["TJ 3 items"]);
    }

    #[test]
    fn quote_operators_expand() {
        assert_eq!(run(b"(x) '"), vec!["T*", "Tj x"]);
        assert_eq!(run(b"2 1 (x) \""), vec!["Tw 2", "Tc 1", "T*", "Tj x"]);
    }

    #[test]
    fn dash_pattern_splits_array_and_phase() {
        assert_eq!(run(b"[3 5] 6 d"), vec!["d [3.0, 5.0] 6"]);
        assert_eq!(run(b"[] 0 d"), vec!["d [] 0"]);
    }

    #[test]
    fn component_color_operators_select_by_count() {
        assert_eq!(run(b"0.5 sc"), vec!["g 0.5"]);
        assert_eq!(run(b"1 0 0 scn"), vec!["rg 1 0 0"]);
        assert_eq!(run(b"0 0 0 1 SCN"), vec!["K 0 0 0 1"]);
    }

    #[test]
    fn color_space_names_are_stripped() {
        assert_eq!(run(b"/DeviceRGB cs /DeviceGray CS"), vec!["cs DeviceRGB", "CS DeviceGray"]);
    }

    // --- Permissive failure ---

    #[test]
    fn unknown_operator_clears_stack_and_continues() {
        // The four stale operands must not leak into the `m` that follows.
        let events = run(b"1 2 3 4 BOGUS 5 6 m 7 8 l S");
        assert_eq!(events, vec!["m 5 6", "l 7 8", "S"]);
    }

    #[test]
    fn wrong_arity_is_a_noop() {
        assert_eq!(run(b"1 2 3 m"), Vec::<String>::new());
        assert_eq!(run(b"1 rg"), Vec::<String>::new());
        assert_eq!(run(b"(text) w"), Vec::<String>::new());
    }

    #[test]
    fn wrong_type_is_a_noop() {
        assert_eq!(run(b"/Name (str) Tf"), Vec::<String>::new());
        assert_eq!(run(b"(s) Tm"), Vec::<String>::new());
    }

    #[test]
    fn stale_operands_do_not_feed_later_operators() {
        // `h` takes no operands but must still clear the stack.
        let events = run(b"1 2 h 3 4 m");
        assert_eq!(events, vec!["h", "m 3 4"]);
    }

    #[test]
    fn empty_stream_does_nothing() {
        assert!(run(b"").is_empty());
    }
}
