//! Cursor walk: what a graphing front end does when the user keeps pressing
//! "next root" / "next maximum" / "next intersection".
//!
//! Each call is independent; the loop resumes one step past the last result
//! until the engine reports "not found".
//!
//! Run: `cargo run -p critpoint --example cursor_walk -- "cos(a)" "0.5"`

use critpoint::api::{
    next_intersection, next_maximum, next_minimum, next_root, Context, Coordinate2D, Expr,
    Preferences, SearchWindow,
};

fn walk(label: &str, mut window: SearchWindow, mut op: impl FnMut(SearchWindow) -> Coordinate2D) {
    println!("{label}:");
    loop {
        let p = op(window);
        if !p.is_found() {
            println!("  done ({:?})", p.value);
            break;
        }
        println!("  x={:.6} y={:.6}", p.abscissa, p.value);
        window = window.after(p.abscissa);
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let f_text = args.next().unwrap_or_else(|| "cos(a)".to_string());
    let g_text = args.next().unwrap_or_else(|| "0.5".to_string());
    let f = Expr::parse(&f_text).expect("first expression parses");
    let g = Expr::parse(&g_text).expect("second expression parses");

    let ctx = Context::new();
    let prefs = Preferences::default();
    let window = SearchWindow::new(-1.0, 0.1, 720.0);

    walk("roots", window, |w| next_root(&f, "a", w, &ctx, prefs));
    walk("maxima", window, |w| next_maximum(&f, "a", w, &ctx, prefs));
    walk("minima", window, |w| next_minimum(&f, "a", w, &ctx, prefs));
    walk(&format!("intersections with {g}"), window, |w| {
        next_intersection(&f, &g, "a", w, &ctx, prefs)
    });
}
