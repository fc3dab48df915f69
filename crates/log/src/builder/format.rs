//! Layer construction

/// Build a text `fmt` layer; `$style` is `pretty` or `compact`.
macro_rules! create_fmt_layer {
    ($style:ident, $display:expr, $writer:expr) => {{
        let display: &$crate::config::DisplayConfig = $display;
        tracing_subscriber::fmt::layer()
            .$style()
            .with_writer($writer)
            .with_ansi(display.colors)
            .with_target(display.target)
            .with_thread_ids(display.thread_ids)
            .with_thread_names(display.thread_names)
            .with_file(display.source)
            .with_line_number(display.source)
    }};
}

/// Build a JSON `fmt` layer
macro_rules! create_json_layer {
    ($display:expr, $writer:expr) => {{
        let display: &$crate::config::DisplayConfig = $display;
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer($writer)
            .with_target(display.target)
            .with_thread_ids(display.thread_ids)
            .with_thread_names(display.thread_names)
            .with_file(display.source)
            .with_line_number(display.source)
            .with_current_span(true)
            .with_span_list(display.span_list)
            .flatten_event(display.flatten)
    }};
}

pub(crate) use {create_fmt_layer, create_json_layer};
