mod backward;
mod forward;

use criterion::criterion_group;

criterion_group!(benches, forward::basic, backward::basic);
