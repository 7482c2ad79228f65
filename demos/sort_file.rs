use std::{env, fs::OpenOptions, io};
use extfile_utils::extsort::FileSorterBuilder;

fn main() -> io::Result<()> {
    let src = env::args().nth(1).expect("missing file");
    let tri_bytes = env::args().nth(2).map_or(false, |x| x == "--tri");

    let mut file = OpenOptions::new().read(true).write(true).open(src)?;
    let sorter = FileSorterBuilder::new().with_early_exit(true).build();
    let stats = if tri_bytes {
        sorter.sort_tri_bytes(&mut file)?
    } else {
        sorter.sort_bytes(&mut file)?
    };
    println!("{:?}", stats);

    Ok(())
}
