/*!
Value-level codec for the MySQL client/server protocol.

This crate turns result cells into the bytes a MySQL-compatible server
sends to its clients. Both row formats are covered: the binary one, used
for prepared statements, in [binary], and the text one, used for plain
queries, in [text]. The wire primitives they are built from live in
[encoding] (length-encoded integers and strings), [null_bitmap] and
[temporal] (packed dates, datetimes and durations).

Every cell is a [Datum](crate::value::Datum):

```rust,ignore
pub enum Datum {
    Null,
    Int64(i64),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Str(String),
    Bytes(Bytes),
    Decimal(Decimal),
    Time(Time),
    Duration(Duration),
    Enum(EnumValue),
    Set(SetValue),
    Bit(BinaryLiteral),
    BinaryLiteral(BinaryLiteral),
    Json(Json),
}
```

Output buffers are taken from an [Allocator](crate::alloc::Allocator), so
a connection can reuse a single arena for all rows of a result set.
*/

pub mod alloc;
pub mod binary;
pub mod common;
pub mod encoding;
pub mod errors;
pub mod model;
pub mod null_bitmap;
pub mod temporal;
pub mod text;
pub mod uniform;
pub mod value;

pub use binary::encode_binary_row;
pub use text::encode_text_row;
