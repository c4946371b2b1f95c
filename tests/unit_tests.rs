// Unit-level tests against the public library API

mod unit {
    mod core {
        mod metrics_test;
    }
    mod parsers {
        mod cycles_test;
        mod imports_test;
    }
    mod scanners {
        mod markers_test;
        mod secrets_test;
    }
}
