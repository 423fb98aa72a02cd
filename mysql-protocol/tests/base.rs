#[macro_export]
macro_rules! bconcat {
    ($($token: expr)*) => {
        &{
            let mut buf = ::bytes::BytesMut::new();
            $(
                buf.extend_from_slice($token);
            )*
            buf
        }[..]
    }
}

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
