//! Concurrency stress tests
//!
//! Exercise the console from several threads at once and assert that the
//! counters stay exact and that per-thread indent/color/mode state never
//! bleeds across threads.

use console_logger_system::prelude::*;
use console_logger_system::Arg;
use std::sync::{Arc, Barrier};
use std::thread;

fn memory_console() -> (LogConsole, CapturedOutput) {
    let (sink, captured) = MemorySink::new();
    let con = LogConsole::builder().console_sink(Box::new(sink)).build();
    (con, captured)
}

#[test]
fn test_counters_exact_under_concurrency() {
    let (con, _captured) = memory_console();
    con.initialize("stress", false);
    con.reset_error_out_count();
    con.reset_success_out_count();

    let mut handles = Vec::new();
    for t in 0..3 {
        let con = con.clone();
        handles.push(thread::spawn(move || {
            for i in 0..10 {
                con.error_write_line("t%d error %d", &[Arg::from(t), Arg::from(i)]);
            }
            for i in 0..5 {
                con.success_write_line("t%d ok %d", &[Arg::from(t), Arg::from(i)]);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(con.error_out_count(), 30);
    assert_eq!(con.success_out_count(), 15);
}

#[test]
fn test_lines_stay_whole_across_threads() {
    let (con, captured) = memory_console();
    con.initialize("stress", false);
    captured.clear();

    let mut handles = Vec::new();
    for t in 0..4 {
        let con = con.clone();
        handles.push(thread::spawn(move || {
            for i in 0..25 {
                con.write_line("thread %d line %d", &[Arg::from(t), Arg::from(i)]);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    // one write_line is one critical section: every line arrives intact
    let lines = captured.lines();
    assert_eq!(lines.len(), 100);
    for line in &lines {
        assert!(
            line.starts_with("thread ") && line.contains(" line "),
            "interleaved line: {:?}",
            line
        );
    }
}

#[test]
fn test_thread_state_is_isolated() {
    let (con, _captured) = memory_console();
    con.initialize("stress", false);
    con.reset_error_out_count();
    con.reset_success_out_count();

    let barrier = Arc::new(Barrier::new(2));

    let con_a = con.clone();
    let barrier_a = barrier.clone();
    let a = thread::spawn(move || {
        con_a.enter_error();
        con_a.set_indent(12);
        barrier_a.wait();
        for i in 0..10 {
            con_a.write_line("failing step %d", &[Arg::from(i)]);
            // the other thread runs in between, our state must hold
            assert_eq!(con_a.indent_level(), 12);
            assert_eq!(con_a.fg_color(), ConsoleColor::BrightRed);
        }
        con_a.exit_error();
        assert_eq!(con_a.fg_color(), ConsoleColor::White);
    });

    let con_b = con.clone();
    let barrier_b = barrier;
    let b = thread::spawn(move || {
        con_b.enter_success();
        con_b.set_indent(8);
        barrier_b.wait();
        for i in 0..10 {
            con_b.write_line("passing step %d", &[Arg::from(i)]);
            assert_eq!(con_b.indent_level(), 8);
            assert_eq!(con_b.fg_color(), ConsoleColor::Green);
        }
        con_b.exit_success();
        assert_eq!(con_b.indent_level(), 8);
    });

    a.join().unwrap();
    b.join().unwrap();

    assert_eq!(con.error_out_count(), 10);
    assert_eq!(con.success_out_count(), 10);
    // the main thread was never touched by either mode
    assert_eq!(con.fg_color(), ConsoleColor::White);
    assert_eq!(con.indent_level(), 0);
}

#[test]
fn test_module_tags_are_per_thread() {
    let (con, captured) = memory_console();
    con.initialize("stress", false);
    captured.clear();

    let con_tagged = con.clone();
    let tagged = thread::spawn(move || {
        let con = con_tagged.for_module("Muted");
        for _ in 0..20 {
            con.write_line("should never appear", &[]);
        }
    });

    let con_plain = con.clone();
    let plain = thread::spawn(move || {
        for i in 0..20 {
            con_plain.write_line("plain %d", &[Arg::from(i)]);
        }
    });

    tagged.join().unwrap();
    plain.join().unwrap();

    let lines = captured.lines();
    assert_eq!(lines.len(), 20);
    assert!(lines.iter().all(|l| l.starts_with("plain ")));
}

#[test]
fn test_concurrent_initialize_deinitialize() {
    let (con, _captured) = memory_console();
    con.initialize("stress", false);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let con = con.clone();
        handles.push(thread::spawn(move || {
            con.initialize("ignored", false);
            con.write_line("working", &[]);
            con.deinitialize();
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    // the main thread's reference is still held
    assert!(con.is_initialized());
    con.deinitialize();
    assert!(!con.is_initialized());
}
