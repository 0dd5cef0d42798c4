use std::io;
use std::sync::{Arc, Mutex};

use kestrel_resolve::ast::CompilationUnit;
use kestrel_resolve::{CompilationUnitContext, Context, SynchronizedTypeSolver, TypeBodyContext};
use kestrel_types::{MemoryTypeSolver, MethodDecl, MethodLike, Type, TypeDecl, TypeSolver};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct SharedLogBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedLogBuffer {
    fn as_string(&self) -> String {
        let bytes = self.0.lock().expect("log buffer mutex poisoned");
        String::from_utf8_lossy(&bytes).to_string()
    }
}

struct SharedLogWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut out = self.0.lock().expect("log buffer mutex poisoned");
        out.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedLogBuffer {
    type Writer = SharedLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SharedLogWriter(self.0.clone())
    }
}

fn capture<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = SharedLogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .without_time()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(logs.clone())
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, logs.as_string())
}

#[test]
fn ambiguous_overloads_log_the_declaration_order_fallback() {
    let string = || Type::named("java.lang.String");
    let ambiguous = TypeDecl::class("com.example.Pair")
        .extends(Type::object())
        .with_method(
            MethodDecl::new("com.example.Pair", "of")
                .with_param("a", Type::object())
                .with_param("b", string()),
        )
        .with_method(
            MethodDecl::new("com.example.Pair", "of")
                .with_param("a", string())
                .with_param("b", Type::object()),
        );
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let unit = Arc::new(CompilationUnit::new(Some("com.example")).with_type(ambiguous));
    let root = CompilationUnitContext::new(Arc::clone(&unit));
    let class = TypeBodyContext::new(&root, Arc::clone(&unit.types[0]));

    let (chosen, logs) = capture(|| {
        class
            .solve_method("of", &[string(), string()], false, &solver)
            .into_declaration()
    });

    let chosen = chosen.unwrap();
    assert_eq!(chosen.param_type(0), Some(&Type::object()));
    assert!(logs.contains("overload tie-break"), "{logs}");
    assert!(logs.contains("unique=false"), "{logs}");
}

#[test]
fn cache_misses_are_logged_once_per_name() {
    let solver = SynchronizedTypeSolver::new(MemoryTypeSolver::with_minimal_jdk());

    let ((), logs) = capture(|| {
        for _ in 0..3 {
            assert!(solver.has_type("java.util.Map"));
        }
    });

    assert_eq!(logs.matches("miss (cached)").count(), 1, "{logs}");
    assert!(logs.contains("kestrel.cache"), "{logs}");
}
