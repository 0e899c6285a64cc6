//! Shared helpers for benchmarks

/// A txtar archive with `files` generated Go files of `funcs` functions each
pub fn generate_archive(files: usize, funcs: usize) -> String {
    let mut out = String::from("generated benchmark archive\n");
    for file in 0..files {
        out.push_str(&format!("-- pkg/file{}.go --\n", file));
        out.push_str(&generate_go(file, funcs));
    }
    out
}

/// One Go file mixing declarations, control flow and expressions
pub fn generate_go(seed: usize, funcs: usize) -> String {
    let mut src = format!(
        "package pkg\n\nimport (\n\t\"fmt\"\n\t\"strings\"\n)\n\ntype Item{seed} struct {{\n\tName string `json:\"name\"`\n\tTags []string\n\tNext *Item{seed}\n}}\n\n"
    );
    for i in 0..funcs {
        src.push_str(&format!(
            "func (it *Item{seed}) Step{i}(xs []int, m map[string]int) (int, error) {{\n\
             \ttotal := 0\n\
             \tfor _, x := range xs {{\n\
             \t\tif x%2 == 0 {{\n\
             \t\t\ttotal += x * {i}\n\
             \t\t}} else {{\n\
             \t\t\ttotal -= m[strings.ToUpper(it.Name)]\n\
             \t\t}}\n\
             \t}}\n\
             \tswitch {{\n\
             \tcase total > 100:\n\
             \t\treturn total, fmt.Errorf(\"too big: %d\", total)\n\
             \tdefault:\n\
             \t}}\n\
             \treturn total, nil\n\
             }}\n\n"
        ));
    }
    src
}
