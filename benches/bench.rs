use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tries::radix::RadixTrie;
use tries::trie::Trie;

#[derive(Clone)]
enum TrieEnum {
    Plain(Trie),
    Radix(RadixTrie),
}

impl TrieEnum {
    fn contains(&self, key: &str) -> bool {
        match self {
            Self::Plain(t) => t.contains(key),
            Self::Radix(t) => t.contains(key),
        }
    }

    fn insert(&mut self, key: &str) {
        match self {
            Self::Plain(t) => t.insert(key).expect("benchmark keys are non-empty"),
            Self::Radix(t) => t.insert(key).expect("benchmark keys are non-empty"),
        }
    }

    fn remove(&mut self, key: &str) {
        match self {
            Self::Plain(t) => t.remove(key),
            Self::Radix(t) => t.remove(key),
        }
    }

    fn auto_complete(&self, prefix: &str) -> Vec<String> {
        match self {
            Self::Plain(t) => t.auto_complete(prefix),
            Self::Radix(t) => t.auto_complete(prefix),
        }
    }
}

/// Deterministic word list with heavy prefix sharing: every word is a
/// concatenation of two-letter syllables.
fn words(count: usize) -> Vec<String> {
    const SYLLABLES: [&str; 8] = ["ba", "be", "bi", "ca", "ce", "co", "da", "de"];
    (0..count)
        .map(|i| {
            let mut word = String::new();
            let mut n = i;
            loop {
                word.push_str(SYLLABLES[n % SYLLABLES.len()]);
                n /= SYLLABLES.len();
                if n == 0 {
                    break;
                }
            }
            word
        })
        .collect()
}

/// Helper to bench a function on a trie.
/// It creates a group for the given name and closure and runs tests for
/// various sizes and implementations of tries before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut TrieEnum, &str)) {
    let mut group = c.benchmark_group(name);

    for count in [64usize, 512, 4096] {
        let list = words(count);
        let probe = list[count / 2].clone();

        let plain = {
            let mut trie = Trie::new();
            for word in &list {
                trie.insert(word).expect("benchmark keys are non-empty");
            }
            TrieEnum::Plain(trie)
        };
        let radix = {
            let mut trie = RadixTrie::new();
            for word in &list {
                trie.insert(word).expect("benchmark keys are non-empty");
            }
            TrieEnum::Radix(trie)
        };

        for (name, trie) in [("plain", plain), ("radix", radix)] {
            let id = BenchmarkId::new(name, count);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut trie = black_box(trie.clone());
                        let instant = std::time::Instant::now();
                        f(&mut trie, black_box(&probe));
                        time += instant.elapsed();
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "contains", |trie, word| {
        let _found = black_box(trie.contains(word));
    });
    bench_helper(c, "contains-miss", |trie, _| {
        let _found = black_box(trie.contains("zyxw"));
    });

    bench_helper(c, "insert", |trie, _| {
        trie.insert("zyxw");
    });
    bench_helper(c, "remove", |trie, word| {
        trie.remove(word);
    });

    bench_helper(c, "auto-complete", |trie, _| {
        let _completions = black_box(trie.auto_complete("ba"));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
