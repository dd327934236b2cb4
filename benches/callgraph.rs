//! Benchmarks for hierarchy and call graph construction.
//!
//! Uses a synthetic project shaped like a typical application module:
//! - A handful of interfaces, each implemented by a family of class chains
//! - Every method invokes a mix of static, virtual and interface calls
//! - Some calls target library classes that are not part of the project

extern crate callscope;

use callscope::{
    analysis::{CallGraph, CallGraphConfig, Hierarchy},
    project::{
        ClassDef, InvokeExpr, InvokeKind, MethodDef, Modifiers, Project, ProjectLoader, Statement,
    },
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

const INTERFACES: usize = 8;
const CHAIN_DEPTH: usize = 4;

fn invoke(kind: InvokeKind, class: String, name: &str) -> Statement {
    Statement::Invoke(InvokeExpr::new(kind, class, name, Vec::<String>::new()))
}

/// Builds `families` class chains per interface, each class declaring `handle` and `step`.
fn synthetic_project(families: usize) -> Project {
    let mut loader = ProjectLoader::new();

    for i in 0..INTERFACES {
        loader = loader.class(
            ClassDef::interface(format!("bench.I{i}"))
                .modifiers(Modifiers::PUBLIC)
                .method(
                    MethodDef::new("handle").modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT),
                ),
        );

        for f in 0..families {
            for d in 0..CHAIN_DEPTH {
                let name = format!("bench.C{i}_{f}_{d}");
                let mut class = ClassDef::new(&name).modifiers(Modifiers::PUBLIC);
                class = if d == 0 {
                    class.implements(format!("bench.I{i}"))
                } else {
                    class.extends(format!("bench.C{i}_{f}_{}", d - 1))
                };

                let next_interface = format!("bench.I{}", (i + 1) % INTERFACES);
                let handle = MethodDef::new("handle").modifiers(Modifiers::PUBLIC).block([
                    invoke(InvokeKind::Static, name.clone(), "step"),
                    invoke(InvokeKind::Interface, next_interface, "handle"),
                    invoke(InvokeKind::Static, "java.lang.System".to_string(), "nanoTime"),
                ]);
                let step = MethodDef::new("step")
                    .modifiers(Modifiers::PUBLIC | Modifiers::STATIC)
                    .block([invoke(InvokeKind::Virtual, format!("bench.C{i}_{f}_0"), "handle")]);

                loader = loader.class(class.method(handle).method(step));
            }
        }
    }

    loader.build().unwrap()
}

fn bench_hierarchy_queries(c: &mut Criterion) {
    let project = synthetic_project(16);

    c.bench_function("hierarchy_implementers", |b| {
        b.iter(|| {
            let hierarchy = Hierarchy::new(&project);
            let mut total = 0;
            for i in 0..INTERFACES {
                let iface = project.class_id(&format!("bench.I{i}")).unwrap();
                total += hierarchy.get_implementers(iface).unwrap().len();
            }
            black_box(total)
        });
    });
}

fn bench_callgraph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("callgraph_build");

    for families in [4, 16, 64] {
        let project = synthetic_project(families);

        group.bench_with_input(BenchmarkId::new("sequential", families), &project, |b, project| {
            b.iter(|| {
                let hierarchy = Hierarchy::new(project);
                let graph =
                    CallGraph::build_with_config(&hierarchy, CallGraphConfig::sequential()).unwrap();
                black_box(graph.edge_count())
            });
        });

        group.bench_with_input(BenchmarkId::new("parallel", families), &project, |b, project| {
            b.iter(|| {
                let hierarchy = Hierarchy::new(project);
                let graph = CallGraph::build(&hierarchy).unwrap();
                black_box(graph.edge_count())
            });
        });
    }

    group.finish();
}

fn bench_caller_queries(c: &mut Criterion) {
    let project = synthetic_project(16);
    let hierarchy = Hierarchy::new(&project);
    let graph = CallGraph::build(&hierarchy).unwrap();
    let target = project.find_method("bench.C0_0_3", "step", &[]).unwrap();

    c.bench_function("callgraph_func_set_depth_4", |b| {
        b.iter(|| black_box(graph.get_call_func_set(black_box(target), 4).len()));
    });

    c.bench_function("callgraph_call_chain_depth_3", |b| {
        b.iter(|| black_box(graph.get_call_chain(black_box(target), 3).len()));
    });
}

criterion_group!(
    benches,
    bench_hierarchy_queries,
    bench_callgraph_build,
    bench_caller_queries
);
criterion_main!(benches);
