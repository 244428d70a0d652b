/*
MIT License
Copyright (c)  Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use geometry::Point3D;
use model::{Model, Space};

/// A grid of `n` by `n` box-like spaces, all touching their neighbours
fn grid(n: usize) -> Model {
    let mut model = Model::default();
    let floor_print = [
        Point3D::new(0., 0., 0.),
        Point3D::new(0., 5., 0.),
        Point3D::new(5., 5., 0.),
        Point3D::new(5., 0., 0.),
    ];
    for i in 0..n {
        for j in 0..n {
            let origin = Point3D::new((5 * i) as _, (5 * j) as _, 0.);
            let space = Space::new(format!("Space {}-{}", i, j)).with_origin(origin);
            model
                .add_space_from_floor_print(space, &floor_print, 3.)
                .unwrap();
        }
    }
    model
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let model = grid(8);
    c.bench_function("match_surfaces", |b| {
        b.iter(|| {
            let mut m = black_box(model.clone());
            m.match_surfaces().unwrap()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
