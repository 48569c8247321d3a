//! Integration tests for the logger
//!
//! These tests verify:
//! - Threshold gating and the default line layout
//! - Template customization and template error propagation
//! - Truncation and caller resolution
//! - Hook ordering and hook/threshold interaction
//! - File sinks and configuration files

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use loggo::prelude::*;
use loggo::PrefixHook;
use std::panic::Location;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const FAKE_NOW: &str = "2022-01-25 00:00:00";

fn fake_now() -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2022, 1, 25, 0, 0, 0)
        .single()
        .expect("valid datetime")
        .fixed_offset()
}

fn logger_with(threshold: Level, configure: impl FnOnce(LoggerBuilder) -> LoggerBuilder) -> (Logger, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let builder = Logger::builder(threshold)
        .output(buffer.clone())
        .time_provider(fake_now);
    (configure(builder).build(), buffer)
}

fn logger(threshold: Level) -> (Logger, SharedBuffer) {
    logger_with(threshold, |b| b)
}

#[test]
fn test_log_threshold_matrix() {
    let cases = [
        (Level::Info, Level::Info, format!("{} [ INFO]: message\n", FAKE_NOW)),
        (Level::Debug, Level::Info, format!("{} [ INFO]: message\n", FAKE_NOW)),
        (Level::Debug, Level::Fatal, format!("{} [FATAL]: message\n", FAKE_NOW)),
        (Level::Fatal, Level::Error, String::new()),
        (Level::Warn, Level::Info, String::new()),
    ];

    for (threshold, level, want) in cases {
        let (logger, buffer) = logger(threshold);
        logger.log(level, "message");
        assert_eq!(
            buffer.contents(),
            want,
            "threshold {:?}, level {:?}",
            threshold,
            level
        );
    }
}

#[test]
fn test_every_level_at_or_above_threshold_emits_one_line() {
    for threshold in Level::ALL {
        for level in Level::ALL {
            let (logger, buffer) = logger(threshold);
            logger.try_log(level, "payload").expect("default template renders");

            if level >= threshold {
                let contents = buffer.contents();
                assert_eq!(contents.matches('\n').count(), 1);
                assert!(contents.ends_with('\n'));
                assert!(contents.contains(level.to_str()));
                assert!(contents.contains(FAKE_NOW));
                assert!(contents.contains("payload"));
            } else {
                assert!(buffer.is_empty());
            }
        }
    }
}

#[test]
fn test_level_methods() {
    let (logger, buffer) = logger(Level::Info);
    let cases: [(fn(&Logger, &str), &str); 5] = [
        (|l, m| l.debug(m), ""),
        (|l, m| l.info(m), "[ INFO]"),
        (|l, m| l.warn(m), "[ WARN]"),
        (|l, m| l.error(m), "[ERROR]"),
        (|l, m| l.fatal(m), "[FATAL]"),
    ];

    for (log, tag) in cases {
        log(&logger, "level message");
        let want = if tag.is_empty() {
            String::new()
        } else {
            format!("{} {}: level message\n", FAKE_NOW, tag)
        };
        assert_eq!(buffer.contents(), want);
        buffer.clear();
    }
}

#[test]
fn test_formatted_level_methods() {
    let (logger, buffer) = logger(Level::Info);
    logger.debugf(format_args!("debug {}", "format"));
    logger.infof(format_args!("info {}", "format"));
    logger.warnf(format_args!("warn {:?}", "format"));
    logger.errorf(format_args!("error {}", 1));
    logger.fatalf(format_args!("fatal {:.1}", 2.25));

    assert_eq!(
        buffer.lines(),
        [
            format!("{} [ INFO]: info format", FAKE_NOW),
            format!("{} [ WARN]: warn \"format\"", FAKE_NOW),
            format!("{} [ERROR]: error 1", FAKE_NOW),
            format!("{} [FATAL]: fatal 2.2", FAKE_NOW),
        ]
    );
}

#[test]
fn test_end_to_end_examples() {
    // threshold Info, level Info
    let (logger, buffer) = logger(Level::Info);
    logger.info("hello");
    assert_eq!(buffer.contents(), "2022-01-25 00:00:00 [ INFO]: hello\n");

    // threshold Warn, level Info
    let (logger, buffer) = self::logger(Level::Warn);
    logger.info("hello");
    assert_eq!(buffer.contents(), "");

    // max size 5
    let (logger, buffer) = logger_with(Level::Info, |b| b.max_size(5).template("{Message}"));
    logger.info("hello world");
    assert_eq!(buffer.contents(), "hello\n");

    // custom template
    let (logger, buffer) = logger_with(Level::Info, |b| b.template("{Level}: {Message}"));
    logger.info("hi");
    assert_eq!(buffer.contents(), "INFO: hi\n");
}

#[test]
fn test_max_size_with_default_template() {
    let (logger, buffer) = logger_with(Level::Info, |b| b.max_size(10));
    logger.info("This is an info log message");
    assert_eq!(buffer.contents(), format!("{} [ INFO]: This is an\n", FAKE_NOW));
}

#[test]
fn test_truncation_keeps_characters_whole() {
    let (logger, buffer) = logger_with(Level::Info, |b| b.max_size(3).template("{Message}"));
    logger.info("ñandú");
    assert_eq!(buffer.contents(), "ñan\n");
}

#[test]
fn test_time_format() {
    let (logger, buffer) = logger_with(Level::Info, |b| b.time_format("%d/%m/%y 00:00"));
    logger.info("This is an info log message");
    assert_eq!(
        buffer.contents(),
        "25/01/22 00:00 [ INFO]: This is an info log message\n"
    );

    let (logger, buffer) =
        logger_with(Level::Info, |b| b.timestamp_format(TimestampFormat::Rfc3339).template("{Time}"));
    logger.info("x");
    assert_eq!(buffer.contents(), "2022-01-25T00:00:00+00:00\n");
}

#[test]
fn test_template_with_all_fields() {
    let (logger, buffer) = logger_with(Level::Info, |b| {
        b.template("{Time} {Caller} | [{Level}]: {Message}")
            .caller_provider(FixedCaller::new("file", 1))
    });
    logger.info("This is an info log message");
    assert_eq!(
        buffer.contents(),
        "2022-01-25 00:00:00 file:1 | [INFO]: This is an info log message\n"
    );
}

#[test]
fn test_unknown_caller_in_any_position() {
    for (template, want) in [
        ("{Caller} [{Level}]: {Message}", "unknown [INFO]: msg\n"),
        ("{Message} @ {Caller}", "msg @ unknown\n"),
        ("{Caller}{Caller}", "unknownunknown\n"),
    ] {
        let (logger, buffer) =
            logger_with(Level::Info, |b| b.template(template).caller_provider(UnknownCaller));
        logger.info("msg");
        assert_eq!(buffer.contents(), want);
    }
}

#[test]
fn test_closure_caller_provider() {
    let (logger, buffer) = logger_with(Level::Info, |b| {
        b.template("{Caller}")
            .caller_provider(|site: &'static Location<'static>| {
                Some(CallerInfo::new("relative.rs", site.line() + 1000))
            })
    });
    let line = line!() + 1;
    logger.info("x");
    assert_eq!(buffer.contents(), format!("relative.rs:{}\n", line + 1000));
}

#[test]
fn test_default_caller_is_the_test_itself() {
    let (logger, buffer) = logger_with(Level::Info, |b| b.template("{Caller}"));

    let line = line!() + 1;
    logger.info("direct call");
    let want = format!("tests/integration_tests.rs:{}\n", line);
    assert_eq!(buffer.contents(), want);
    buffer.clear();

    let line = line!() + 1;
    logger.logf(Level::Warn, format_args!("formatted call"));
    assert_eq!(buffer.contents(), format!("tests/integration_tests.rs:{}\n", line));
    buffer.clear();

    let line = line!() + 1;
    loggo::error!(logger, "macro call {}", 1);
    assert_eq!(buffer.contents(), format!("tests/integration_tests.rs:{}\n", line));
}

#[test]
fn test_template_parse_error() {
    let (logger, buffer) = logger_with(Level::Info, |b| b.template("{Level"));

    let err = logger
        .try_logf(Level::Info, format_args!("This is an info log message"))
        .unwrap_err();
    assert!(matches!(err, LoggerError::TemplateParse(_)));
    assert_eq!(
        err.to_string(),
        "error parsing template: unclosed placeholder opened at offset 0"
    );

    // Best-effort variants swallow the error and write nothing
    logger.info("ignored");
    logger.logf(Level::Error, format_args!("ignored {}", 1));
    assert!(buffer.is_empty());
    assert_eq!(logger.metrics().failed(), 3);
}

#[test]
fn test_template_exec_error() {
    let (logger, buffer) = logger_with(Level::Info, |b| b.template("{SomeField}"));

    let err = logger
        .try_logf(Level::Info, format_args!("This is an info log message"))
        .unwrap_err();
    assert!(matches!(err, LoggerError::TemplateExec(_)));
    assert_eq!(
        err.to_string(),
        "error executing template: unknown field 'SomeField' in render data"
    );

    logger.info("ignored");
    assert!(buffer.is_empty());
}

#[test]
fn test_template_error_below_threshold_is_not_reported() {
    let (logger, buffer) = logger_with(Level::Error, |b| b.template("{Level"));
    assert!(logger.try_log(Level::Info, "filtered first").is_ok());
    assert!(buffer.is_empty());
}

#[test]
fn test_pre_hooks_run_in_order_before_threshold() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_a = Arc::clone(&seen);
    let seen_b = Arc::clone(&seen);

    let (logger, buffer) = logger_with(Level::Warn, move |b| {
        b.template("{Message}")
            .pre_hook(move |_, message| {
                message.push_str(" A");
                seen_a.lock().unwrap().push(message.clone());
            })
            .pre_hook(move |_, message| {
                message.push_str(" B");
                seen_b.lock().unwrap().push(message.clone());
            })
    });

    // Dropped by the threshold, but the hooks still see it
    logger.info("dropped");
    assert!(buffer.is_empty());
    assert_eq!(*seen.lock().unwrap(), ["dropped A", "dropped A B"]);

    logger.error("kept");
    assert_eq!(buffer.contents(), "kept A B\n");
}

#[test]
fn test_post_hooks_run_in_order_after_write() {
    let observed = Arc::new(Mutex::new(Vec::new()));
    let first = Arc::clone(&observed);
    let second = Arc::clone(&observed);
    let buffer = SharedBuffer::new();
    let written = buffer.clone();

    let logger = Logger::builder(Level::Info)
        .output(buffer.clone())
        .template("{Message}")
        .post_hook(move |_, message| {
            // The line is already in the sink when post-hooks run
            first
                .lock()
                .unwrap()
                .push(format!("C:{}:{}", message, written.contents().trim_end()));
            message.push_str(" rewritten");
        })
        .post_hook(move |_, message| {
            second.lock().unwrap().push(format!("D:{}", message));
        })
        .build();

    logger.info("event");

    // Post-hook rewrites never reach the sink
    assert_eq!(buffer.contents(), "event\n");
    assert_eq!(
        *observed.lock().unwrap(),
        ["C:event:event", "D:event rewritten"]
    );
}

#[test]
fn test_post_hooks_skipped_when_filtered_or_failing() {
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);

    let (logger, _buffer) = logger_with(Level::Warn, move |b| {
        b.template("{Bogus}").post_hook(move |_, _| {
            *counter.lock().unwrap() += 1;
        })
    });

    logger.info("filtered");
    assert!(logger.try_log(Level::Error, "fails").is_err());
    assert_eq!(*calls.lock().unwrap(), 0);
}

#[test]
fn test_post_hooks_hold_the_sink_lock() {
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    let (entered_tx, entered_rx) = mpsc::channel();
    let entered_tx = Mutex::new(entered_tx);
    let buffer = SharedBuffer::new();
    let seen_by_hook = Arc::new(Mutex::new(String::new()));
    let snapshot = Arc::clone(&seen_by_hook);
    let written = buffer.clone();

    let logger = Arc::new(
        Logger::builder(Level::Info)
            .output(buffer.clone())
            .template("{Message}")
            .post_hook(move |_, message| {
                if message.as_str() == "first" {
                    entered_tx.lock().unwrap().send(()).unwrap();
                    // Give the other writer every chance to get in
                    thread::sleep(Duration::from_millis(100));
                    *snapshot.lock().unwrap() = written.contents();
                }
            })
            .build(),
    );

    let first = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || logger.info("first"))
    };

    entered_rx.recv().expect("post-hook started");
    logger.info("second");
    first.join().expect("first writer panicked");

    // "second" could only be written after the post-hook returned
    assert_eq!(*seen_by_hook.lock().unwrap(), "first\n");
    assert_eq!(buffer.lines(), ["first", "second"]);
}

#[test]
fn test_hooks_can_read_context() {
    struct Service(&'static str);

    let (logger, buffer) = logger_with(Level::Info, |b| {
        b.template("{Message}")
            .context(Service("billing"))
            .pre_hook(|logger, message| {
                if let Some(service) = logger.context::<Service>() {
                    message.insert_str(0, &format!("{}: ", service.0));
                }
            })
            .pre_hook_boxed(Box::new(PrefixHook::new("> ")))
    });

    logger.info("invoice sent");
    assert_eq!(buffer.contents(), "> billing: invoice sent\n");
}

#[test]
fn test_sink_write_failure() {
    struct BrokenSink;

    impl std::io::Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "reader went away"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let hooked = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&hooked);
    let logger = Logger::builder(Level::Info)
        .output(BrokenSink)
        .post_hook(move |_, _| *flag.lock().unwrap() = true)
        .build();

    let err = logger.try_log(Level::Info, "lost").unwrap_err();
    assert!(matches!(err, LoggerError::Write { .. }));
    assert!(err.to_string().starts_with("error writing log entry"));
    assert!(!*hooked.lock().unwrap());

    // Best-effort path swallows it
    logger.info("lost again");
    assert_eq!(logger.metrics().failed(), 2);
    assert_eq!(logger.metrics().emitted(), 0);
}

#[test]
fn test_file_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let logger = Logger::builder(Level::Debug)
        .output(FileSink::open(&log_file).expect("Failed to open sink"))
        .time_provider(fake_now)
        .build();

    for i in 0..5 {
        loggo::info!(logger, "Message {}", i);
    }

    // The logger flushes after every entry
    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[4], "2022-01-25 00:00:00 [ INFO]: Message 4");
}

#[test]
fn test_logger_from_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("logger.json");
    std::fs::write(
        &config_path,
        r#"{"threshold": "WARN", "template": "{Time} {Level}: {Message}", "time_format": {"Custom": "%Y/%m/%d"}}"#,
    )
    .unwrap();

    let config = LoggerConfig::from_json_file(&config_path).expect("valid config");
    config.validate().expect("config validates");

    let buffer = SharedBuffer::new();
    let logger = config
        .into_builder()
        .output(buffer.clone())
        .time_provider(fake_now)
        .build();

    logger.info("hidden");
    logger.warn("shown");
    assert_eq!(buffer.contents(), "2022/01/25 WARN: shown\n");
}

#[test]
fn test_metrics_track_outcomes() {
    let (logger, _buffer) = logger(Level::Info);
    logger.debug("filtered");
    logger.info("emitted");
    logger.error("emitted");

    let metrics = logger.metrics();
    assert_eq!(metrics.filtered(), 1);
    assert_eq!(metrics.emitted(), 2);
    assert_eq!(metrics.failed(), 0);
    assert_eq!(metrics.total(), 3);
    assert_eq!(metrics.failure_rate(), 0.0);
}
