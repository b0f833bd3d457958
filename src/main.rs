// This file is a small example of how to use the `attention_checker` library.
// The main library entry point is `src/lib.rs`.

use attention_checker::{AttentionChecker, SceneNode};
use nalgebra::{Point3, Vector3};

fn main() {
    println!("Attention Checker - Example Runner");

    // An observer at the origin looking down +X, and a prop in front of it.
    let camera = SceneNode::new(Point3::origin(), Vector3::x()).into_handle();
    let statue = SceneNode::at(Point3::new(500.0, 0.0, 0.0)).into_handle();

    let mut checker = AttentionChecker::new(&camera);
    checker.detect_visible(
        &statue,
        Some(Box::new(|_| println!("the statue has been spotted"))),
        1000.0,
        false,
    );

    // In a real application the host frame loop drives this once per frame.
    // The statue is already in view, so the one-shot fires on the first tick
    // and the pair removes itself.
    checker.tick(0.016);

    println!("watch pairs remaining: {}", checker.pair_count());
}
