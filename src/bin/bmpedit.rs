//! Interactive menu for editing a BMP image.

use std::io::{self, BufRead, Write};

use bmplab::{BmpError, Equalization, FilterKind, Image, load_image8, load_image24, save_image};

const MENU: &str = "
BMP editor
 1. Load 8-bit grayscale image
 2. Load 24-bit color image
 3. Save image
 4. Image info
 5. Negative
 6. Brightness
 7. Threshold (8-bit)
 8. Grayscale (24-bit)
 9. Box blur
10. Gaussian blur
11. Outline
12. Emboss
13. Sharpen
14. Histogram equalization
15. Quit";

struct Prompt<R> {
    input: R,
}

impl<R: BufRead> Prompt<R> {
    /// Print `msg` and read one trimmed line; `None` at end of input.
    fn line(&mut self, msg: &str) -> io::Result<Option<String>> {
        print!("{msg}");
        io::stdout().flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_owned()))
    }

    /// Read an integer, re-prompting on anything that doesn't parse.
    fn int(&mut self, msg: &str) -> io::Result<Option<i32>> {
        loop {
            let Some(line) = self.line(msg)? else {
                return Ok(None);
            };
            match line.parse() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => println!("Please enter a whole number."),
            }
        }
    }
}

fn main() {
    let stdin = io::stdin();
    let mut prompt = Prompt {
        input: stdin.lock(),
    };
    if let Err(err) = run(&mut prompt) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run<R: BufRead>(prompt: &mut Prompt<R>) -> io::Result<()> {
    let mut slot: Option<Image> = None;
    loop {
        println!("{MENU}");
        let Some(choice) = prompt.int(">>> Your choice: ")? else {
            return Ok(());
        };
        match choice {
            1 | 2 => {
                let Some(path) = prompt.line("File path to load: ")? else {
                    return Ok(());
                };
                let loaded = if choice == 1 {
                    load_image8(&path).map(Image::from)
                } else {
                    load_image24(&path).map(Image::from)
                };
                match loaded {
                    Ok(img) => {
                        println!("Loaded {}", img.describe());
                        slot = Some(img);
                    }
                    Err(err) => println!("Could not load {path}: {err}"),
                }
            }
            15 => {
                println!("Exiting...");
                return Ok(());
            }
            3..=14 => {
                let Some(img) = slot.as_mut() else {
                    println!("No image loaded.");
                    continue;
                };
                if !edit(prompt, img, choice)? {
                    return Ok(());
                }
            }
            _ => println!("Invalid choice. Try again."),
        }
    }
}

/// Run one menu action on the loaded image. Returns `false` at end of input.
fn edit<R: BufRead>(prompt: &mut Prompt<R>, img: &mut Image, choice: i32) -> io::Result<bool> {
    match choice {
        3 => {
            let Some(path) = prompt.line("File path to save: ")? else {
                return Ok(false);
            };
            report(save_image(&path, img).map(|()| format!("Saved to {path}.")));
        }
        4 => println!("{}", img.describe()),
        5 => {
            img.negative();
            println!("Negative applied.");
        }
        6 => {
            let Some(delta) = prompt.int("Brightness adjustment (may be negative): ")? else {
                return Ok(false);
            };
            img.brightness(delta);
            println!("Brightness adjusted by {delta}.");
        }
        7 => match img {
            Image::Gray8(gray) => {
                let Some(t) = prompt.int("Threshold (0-255): ")? else {
                    return Ok(false);
                };
                gray.threshold(t);
                println!("Threshold applied.");
            }
            Image::Rgb24(_) => println!("Threshold needs an 8-bit image."),
        },
        8 => match img {
            Image::Rgb24(color) => {
                color.grayscale();
                println!("Grayscale applied.");
            }
            Image::Gray8(_) => println!("Image is already grayscale."),
        },
        9..=13 => {
            let kind = FilterKind::ALL[(choice - 9) as usize];
            report(
                img.apply_filter(kind)
                    .map(|_| format!("{} applied.", capitalize(kind.name()))),
            );
        }
        14 => match img.equalize() {
            Equalization::Applied => println!("Histogram equalized."),
            Equalization::Uniform => {
                println!("Image has a single intensity level; nothing to equalize.")
            }
        },
        _ => println!("Invalid choice. Try again."),
    }
    Ok(true)
}

fn report(result: Result<String, BmpError>) {
    match result {
        Ok(msg) => println!("{msg}"),
        Err(err) => println!("Error: {err}"),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
