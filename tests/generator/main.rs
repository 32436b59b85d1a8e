macro_rules! setup {
    ($binder:ident, $open:ident, $ctx:ident) => {
        let _ = sboxgen::config::Config::new("")?.logger().is_test(true).try_init();
        let ($binder, $open) = super::functions::binder();
        let $ctx = super::functions::exec_context();
    };
}

mod functions;
