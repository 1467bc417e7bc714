/// Path Interpreter
///
/// Walks the token stream of a stroke's path data and emits the points a pen
/// passes through. Curves are flattened into a fixed number of samples so that
/// every stroke of every glyph has comparable density.

use crate::glyph::types::Point;

use super::lexer::{tokenize, Token};
use super::policy::{ParsePolicy, PathError};

/// Samples per flattened curve segment, both endpoints included.
pub const CURVE_SAMPLES: usize = 31;

struct Cursor {
    x: f64,
    y: f64,
}

type Handler = fn(&mut Cursor, &[f64], &mut Vec<Point>);

struct CommandSpec {
    arity: usize,
    starts_subpath: bool,
    handler: Handler,
}

fn command_spec(command: char) -> Option<CommandSpec> {
    let (arity, starts_subpath, handler): (usize, bool, Handler) = match command {
        'M' => (2, true, move_to as Handler),
        'L' => (2, false, line_to as Handler),
        'H' => (1, false, horizontal_to as Handler),
        'V' => (1, false, vertical_to as Handler),
        'Q' => (4, false, quad_to as Handler),
        'q' => (4, false, quad_by as Handler),
        'C' => (6, false, curve_to as Handler),
        'c' => (6, false, curve_by as Handler),
        _ => return None,
    };
    Some(CommandSpec { arity, starts_subpath, handler })
}

fn move_to(cursor: &mut Cursor, args: &[f64], out: &mut Vec<Point>) {
    cursor.x = args[0];
    cursor.y = args[1];
    out.push(Point::new(cursor.x, cursor.y));
}

fn line_to(cursor: &mut Cursor, args: &[f64], out: &mut Vec<Point>) {
    move_to(cursor, args, out);
}

fn horizontal_to(cursor: &mut Cursor, args: &[f64], out: &mut Vec<Point>) {
    cursor.x = args[0];
    out.push(Point::new(cursor.x, cursor.y));
}

fn vertical_to(cursor: &mut Cursor, args: &[f64], out: &mut Vec<Point>) {
    cursor.y = args[0];
    out.push(Point::new(cursor.x, cursor.y));
}

fn quad_to(cursor: &mut Cursor, args: &[f64], out: &mut Vec<Point>) {
    let start = Point::new(cursor.x, cursor.y);
    let control = Point::new(args[0], args[1]);
    let end = Point::new(args[2], args[3]);
    flatten_quad(start, control, end, out);
    cursor.x = end.x;
    cursor.y = end.y;
}

fn quad_by(cursor: &mut Cursor, args: &[f64], out: &mut Vec<Point>) {
    let absolute = [
        cursor.x + args[0],
        cursor.y + args[1],
        cursor.x + args[2],
        cursor.y + args[3],
    ];
    quad_to(cursor, &absolute, out);
}

fn curve_to(cursor: &mut Cursor, args: &[f64], out: &mut Vec<Point>) {
    let start = Point::new(cursor.x, cursor.y);
    let c1 = Point::new(args[0], args[1]);
    let c2 = Point::new(args[2], args[3]);
    let end = Point::new(args[4], args[5]);
    flatten_cubic(start, c1, c2, end, out);
    cursor.x = end.x;
    cursor.y = end.y;
}

fn curve_by(cursor: &mut Cursor, args: &[f64], out: &mut Vec<Point>) {
    let absolute = [
        cursor.x + args[0],
        cursor.y + args[1],
        cursor.x + args[2],
        cursor.y + args[3],
        cursor.x + args[4],
        cursor.y + args[5],
    ];
    curve_to(cursor, &absolute, out);
}

fn flatten_quad(p0: Point, p1: Point, p2: Point, out: &mut Vec<Point>) {
    let steps = (CURVE_SAMPLES - 1) as f64;
    for i in 0..CURVE_SAMPLES {
        let t = i as f64 / steps;
        let mt = 1.0 - t;
        let x = mt.powi(2) * p0.x + 2.0 * t * mt * p1.x + t.powi(2) * p2.x;
        let y = mt.powi(2) * p0.y + 2.0 * t * mt * p1.y + t.powi(2) * p2.y;
        out.push(Point::new(x, y));
    }
}

fn flatten_cubic(p0: Point, p1: Point, p2: Point, p3: Point, out: &mut Vec<Point>) {
    let steps = (CURVE_SAMPLES - 1) as f64;
    for i in 0..CURVE_SAMPLES {
        let t = i as f64 / steps;
        let mt = 1.0 - t;
        let x = p0.x * mt.powi(3)
            + 3.0 * p1.x * t * mt.powi(2)
            + 3.0 * p2.x * t.powi(2) * mt
            + p3.x * t.powi(3);
        let y = p0.y * mt.powi(3)
            + 3.0 * p1.y * t * mt.powi(2)
            + 3.0 * p2.y * t.powi(2) * mt
            + p3.y * t.powi(3);
        out.push(Point::new(x, y));
    }
}

/// Interprets path data into the subpaths it draws. Every `M` opens a new
/// subpath; points drawn before any `M` form a subpath of their own.
pub fn interpret_subpaths(data: &str, policy: ParsePolicy) -> Result<Vec<Vec<Point>>, PathError> {
    let tokens = tokenize(data);
    let mut cursor = Cursor { x: 0.0, y: 0.0 };
    let mut subpaths: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let command = match tokens[i] {
            Token::Command(c) => c,
            Token::Number(n) => {
                policy.stray_number(n)?;
                i += 1;
                continue;
            }
        };

        let args_start = i + 1;
        let mut args_end = args_start;
        while let Some(Token::Number(_)) = tokens.get(args_end) {
            args_end += 1;
        }
        let args: Vec<f64> = tokens[args_start..args_end]
            .iter()
            .filter_map(|token| match token {
                Token::Number(n) => Some(*n),
                Token::Command(_) => None,
            })
            .collect();
        i = args_end;

        let spec = match command_spec(command) {
            Some(spec) => spec,
            None => {
                policy.unknown_command(command)?;
                continue;
            }
        };

        let args = policy.fit_arguments(command, &args, spec.arity)?;
        if spec.starts_subpath && !current.is_empty() {
            subpaths.push(std::mem::take(&mut current));
        }
        (spec.handler)(&mut cursor, &args, &mut current);
    }

    if !current.is_empty() {
        subpaths.push(current);
    }
    Ok(subpaths)
}

/// Interprets path data into the ordered points of one stroke.
///
/// Never returns an empty sequence: data that draws nothing yields the origin.
pub fn interpret(data: &str, policy: ParsePolicy) -> Result<Vec<Point>, PathError> {
    let points: Vec<Point> = interpret_subpaths(data, policy)?
        .into_iter()
        .flatten()
        .collect();

    if points.is_empty() {
        Ok(vec![Point::ORIGIN])
    } else {
        Ok(points)
    }
}
